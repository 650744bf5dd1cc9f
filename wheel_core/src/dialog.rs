use crate::item::Item;

/// Why the result dialog was dismissed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseReason {
    CloseButton,
    Backdrop,
    Escape,
}

/// Element that should receive focus after the next render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusTarget {
    DialogCard,
    Trigger,
}

/// Text shown in the dialog. `None` fields are not rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogFields {
    pub title: String,
    pub description: Option<String>,
    pub author: Option<String>,
    pub tag: Option<String>,
}

fn non_empty(s: &str) -> Option<String> {
    (!s.is_empty()).then(|| s.to_string())
}

impl From<&Item> for DialogFields {
    fn from(item: &Item) -> Self {
        Self {
            title: item.title.clone(),
            description: non_empty(&item.description),
            author: non_empty(&item.author),
            tag: non_empty(&item.tag),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DialogState {
    shown: Option<Item>,
    pending_focus: Option<FocusTarget>,
}

impl DialogState {
    pub fn is_open(&self) -> bool {
        self.shown.is_some()
    }

    pub fn fields(&self) -> Option<DialogFields> {
        self.shown.as_ref().map(DialogFields::from)
    }

    pub fn open(&mut self, item: Item) {
        self.shown = Some(item);
        self.pending_focus = Some(FocusTarget::DialogCard);
    }

    /// Returns false when the dialog was already closed.
    pub fn close(&mut self) -> bool {
        if self.shown.take().is_none() {
            return false;
        }
        self.pending_focus = Some(FocusTarget::Trigger);
        true
    }

    pub fn pending_focus(&self) -> Option<FocusTarget> {
        self.pending_focus
    }

    /// Hands the focus request to the renderer exactly once.
    pub fn take_focus(&mut self) -> Option<FocusTarget> {
        self.pending_focus.take()
    }
}
