#[cfg(feature = "terminal")]
pub mod console_mode;

pub mod windowed_mode;

#[derive(Debug, PartialEq, Eq, Copy, Clone, Default)]
pub enum Mode {
    #[default]
    Win,
    Con,
}
