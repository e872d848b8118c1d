pub mod lookup;
pub mod repl;
