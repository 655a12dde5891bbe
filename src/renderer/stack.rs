use crate::symbols::{Role, Symbol};

/// A construct that has been opened and is waiting for its closer.
#[derive(Debug, Clone)]
pub(crate) struct Frame<'t> {
    pub(crate) opener: &'t Symbol,
    /// Name of the symbol that closes this frame.
    pub(crate) expects: &'t str,
    /// Closing tag text committed when the frame was opened.
    pub(crate) closing: &'t str,
    /// Token index of the opener.
    pub(crate) opened_at: usize,
    /// Output collected while a template frame is open.
    pub(crate) capture: Option<String>,
}

impl Frame<'_> {
    pub(crate) fn role(&self) -> Role {
        self.opener.role
    }
}

/// Expected closers paired with their closing tags, resolved LIFO.
#[derive(Debug, Default)]
pub(crate) struct MatchingStack<'t> {
    frames: Vec<Frame<'t>>,
}

impl<'t> MatchingStack<'t> {
    pub(crate) fn new() -> Self {
        Self { frames: Vec::new() }
    }

    #[cfg(test)]
    pub(crate) fn depth(&self) -> usize {
        self.frames.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub(crate) fn top(&self) -> Option<&Frame<'t>> {
        self.frames.last()
    }

    /// Open a frame for `opener`. Symbols without a closer do not nest.
    pub(crate) fn open(&mut self, opener: &'t Symbol, opened_at: usize) {
        let Some(expects) = opener.closes_with.as_deref() else {
            return;
        };
        let capture = (opener.role == Role::Template).then(String::new);
        self.frames.push(Frame {
            opener,
            expects,
            closing: opener.closing_tag.as_deref().unwrap_or(""),
            opened_at,
            capture,
        });
    }

    pub(crate) fn pop(&mut self) -> Option<Frame<'t>> {
        self.frames.pop()
    }

    /// Whether the innermost open construct is closed by `name`.
    pub(crate) fn expects(&self, name: &str) -> bool {
        self.top().is_some_and(|frame| frame.expects == name)
    }

    pub(crate) fn top_role(&self) -> Option<Role> {
        self.top().map(Frame::role)
    }

    pub(crate) fn in_block(&self) -> bool {
        self.frames.iter().any(|frame| frame.role().is_block())
    }

    /// The buffer of the innermost capturing frame, if any.
    pub(crate) fn capture_mut(&mut self) -> Option<&mut String> {
        self.frames
            .iter_mut()
            .rev()
            .find_map(|frame| frame.capture.as_mut())
    }
}
