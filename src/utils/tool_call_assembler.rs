use crate::types::response::ToolCallDelta;
use crate::types::tool::ToolCall;

/// Collects streamed tool call fragments (keyed by `index`) into final [`ToolCall`]s.
///
/// The first fragment for an index usually carries the id and function name; later
/// fragments only append to `arguments`. Arguments are kept as the raw string the
/// model produced.
#[derive(Debug, Default)]
pub struct ToolCallAssembler {
    tool_calls: Vec<(u32, ToolCall)>,
}

impl ToolCallAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, delta: &ToolCallDelta) {
        let pos = match self.tool_calls.iter().position(|(i, _)| *i == delta.index) {
            Some(pos) => pos,
            None => {
                self.tool_calls
                    .push((delta.index, ToolCall::new(String::new(), String::new(), String::new())));
                self.tool_calls.len() - 1
            }
        };
        let call = &mut self.tool_calls[pos].1;

        if let Some(id) = delta.id.as_deref().filter(|s| !s.is_empty()) {
            call.id = id.to_string();
        }
        if let Some(kind) = delta.call_type.as_deref().filter(|s| !s.is_empty()) {
            call.call_type = kind.to_string();
        }
        if let Some(function) = &delta.function {
            // Some servers repeat the name on every fragment; keep the first one.
            if let Some(name) = function.name.as_deref().filter(|s| !s.is_empty()) {
                if call.function.name.is_empty() {
                    call.function.name = name.to_string();
                }
            }
            if let Some(fragment) = function.arguments.as_deref() {
                call.function.arguments.push_str(fragment);
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.tool_calls.is_empty()
    }

    /// Tool calls ordered by stream index.
    pub fn finalize(mut self) -> Vec<ToolCall> {
        self.tool_calls.sort_by_key(|(i, _)| *i);
        self.tool_calls.into_iter().map(|(_, call)| call).collect()
    }
}
