//! User actions.

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    Quit,

    TogglePalette,
    /// Switch between the standard and alternate fuzzy scorer.
    ToggleScoring,
    /// Show the palette including `_internal` commands.
    ShowAllCommands,

    Char(char),
    Backspace,
    ClearQuery,

    PaletteUp,
    PaletteDown,
    PaletteConfirm,
    PaletteCancel,
    /// Key binding pressed while the palette is open; carries the command name.
    RunBinding(String),

    ActivityScrollUp,
    ActivityScrollDown,
    ActivityScrollTop,
    ActivityScrollBottom,
    ClearActivity,
}
