//! Keybinding definitions
//!
//! The table the help dialog is rendered from. Key handling itself lives in
//! the handler module.

/// Context in which a keybinding is active
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyContext {
    /// Active everywhere
    Global,
    /// Active while the expense table has focus
    Table,
    /// Active while the entry form has focus
    Form,
    /// Active in confirmation prompts
    Confirm,
}

impl KeyContext {
    pub const ALL: [KeyContext; 4] = [Self::Global, Self::Table, Self::Form, Self::Confirm];

    pub fn title(self) -> &'static str {
        match self {
            Self::Global => "Global Keys",
            Self::Table => "Expense Table",
            Self::Form => "Entry Form",
            Self::Confirm => "Confirmation",
        }
    }
}

/// A keybinding definition
#[derive(Debug, Clone)]
pub struct Keybinding {
    /// Key as shown to the user
    pub key: &'static str,
    /// Description of what the key does
    pub description: &'static str,
    /// Context where this keybinding is active
    pub context: KeyContext,
}

const fn bind(key: &'static str, description: &'static str, context: KeyContext) -> Keybinding {
    Keybinding {
        key,
        description,
        context,
    }
}

/// All keybindings
pub static KEYBINDINGS: &[Keybinding] = &[
    bind("Ctrl+C", "Quit application", KeyContext::Global),
    bind("Tab", "Switch between form and table", KeyContext::Global),
    bind("F1", "Show help", KeyContext::Global),
    bind("q", "Quit application", KeyContext::Table),
    bind("?", "Show help", KeyContext::Table),
    bind("j/k", "Move selection down/up", KeyContext::Table),
    bind("g/G", "First/last expense", KeyContext::Table),
    bind("e/Enter", "Edit the displayed row", KeyContext::Table),
    bind("u", "Update expense from the displayed row", KeyContext::Table),
    bind("d", "Delete selected expense", KeyContext::Table),
    bind("D", "Delete all expenses", KeyContext::Table),
    bind("r", "Reload from the database", KeyContext::Table),
    bind("Esc", "Clear selection", KeyContext::Table),
    bind("Enter", "Add expense", KeyContext::Form),
    bind("↑/↓", "Previous/next field", KeyContext::Form),
    bind("[ ]", "Previous/next day", KeyContext::Form),
    bind("←/→", "Change category", KeyContext::Form),
    bind("Esc", "Back to the table", KeyContext::Form),
    bind("y/Enter", "Confirm", KeyContext::Confirm),
    bind("n/Esc", "Decline", KeyContext::Confirm),
];

/// Bindings for one context, in declaration order
pub fn for_context(context: KeyContext) -> impl Iterator<Item = &'static Keybinding> {
    KEYBINDINGS.iter().filter(move |k| k.context == context)
}
