mod idl;
pub use idl::*;

mod instruction;
pub use instruction::*;
