/// Input events after key translation. The state machine only sees these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    NavigateUp,
    NavigateDown,
    Select,
    Search,
    NewBranch,
    Delete,
    Refresh,
    InputChar(char),
    InputBackspace,
    InputEscape,
    ConfirmYes,
    ConfirmNo,
    Resize(u16, u16),
    None,
}
