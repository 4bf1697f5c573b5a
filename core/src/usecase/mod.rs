pub mod agenda;

pub use agenda::{AgendaUseCase, AgendaWindow};
