use std::borrow::Cow;

/// A specialized [`DomError`] enum of this crate.
#[derive(Debug, thiserror::Error)]
pub enum DomError {
    /// The handle belongs to an earlier generation of the document or was never valid.
    #[error("Stale node{}: {message}", format_context(.context))]
    StaleNode { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// The requested insertion or removal would break the tree shape.
    #[error("Hierarchy request{}: {message}", format_context(.context))]
    HierarchyRequest { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// The operation does not apply to this kind of node.
    #[error("Wrong node type{}: {message}", format_context(.context))]
    WrongNodeType { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl DomError {
    pub(crate) fn stale(id: impl std::fmt::Display) -> Self {
        Self::StaleNode { message: format!("{id}").into(), context: None }
    }

    pub(crate) fn hierarchy(message: impl Into<Cow<'static, str>>) -> Self {
        Self::HierarchyRequest { message: message.into(), context: None }
    }

    pub(crate) fn wrong_type(
        id: impl std::fmt::Display,
        expected: &'static str,
    ) -> Self {
        Self::WrongNodeType { message: format!("{id}").into(), context: Some(expected.into()) }
    }
}

fn format_context(context: &Option<Cow<'static, str>>) -> Cow<'static, str> {
    context.as_ref().map_or(Cow::Borrowed(""), |c| Cow::Owned(format!(" ({c})")))
}
