#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Global {
    pub is_stack_pointer: bool,
    pub mutable: bool,
    pub init: u32, // 0 for imports
}
