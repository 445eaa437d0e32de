mod aeha;

pub use aeha::Aeha;
