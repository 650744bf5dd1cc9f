use crate::{dialog::DialogFields, wheel::Wheel};

pub const SPINNING_CLASS: &str = "spinning";

/// Visual state derived from a [`Wheel`]. Rendering reads only this.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Presentation {
    pub spinning: bool,
    pub trigger_disabled: bool,
    /// `aria-hidden` on the reel mask while the dialog covers it.
    pub mask_hidden: bool,
    pub dialog: Option<DialogFields>,
}

impl Presentation {
    pub fn of(wheel: &Wheel) -> Self {
        let spinning = wheel.is_spinning();
        let dialog = wheel.dialog().fields();
        Self {
            spinning,
            trigger_disabled: spinning,
            mask_hidden: dialog.is_some(),
            dialog,
        }
    }

    pub fn dialog_hidden(&self) -> bool {
        self.dialog.is_none()
    }
}

impl Wheel {
    pub fn presentation(&self) -> Presentation {
        Presentation::of(self)
    }
}
