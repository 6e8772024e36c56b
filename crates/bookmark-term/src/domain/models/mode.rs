use super::CategoryEditor;
use super::ConfirmDialog;

/// What the keyboard currently drives.
#[derive(Clone, Debug, Default)]
pub enum Mode<'a> {
    #[default]
    Browsing,
    Filtering,
    Confirming(ConfirmDialog),
    Editing(CategoryEditor<'a>),
}

impl<'a> Mode<'a> {
    pub fn is_browsing(&self) -> bool {
        return matches!(self, Mode::Browsing);
    }

    pub fn is_filtering(&self) -> bool {
        return matches!(self, Mode::Filtering);
    }

    pub fn is_confirming(&self) -> bool {
        return matches!(self, Mode::Confirming(_));
    }

    pub fn is_editing(&self) -> bool {
        return matches!(self, Mode::Editing(_));
    }
}
