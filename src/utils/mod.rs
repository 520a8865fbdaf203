//! Small helpers shared by the clients.

pub mod tool_call_assembler;

pub use tool_call_assembler::ToolCallAssembler;
