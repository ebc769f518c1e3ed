use std::fmt;

use uuid::Uuid;

/// The identity of a single node.
///
/// Every node gets a fresh id when it is created; handles that share the node
/// share the id. Two nodes holding equal values still have different ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(Uuid);

impl NodeId {
    pub(crate) fn new() -> Self {
        Self(Uuid::now_v7())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<NodeId> for Uuid {
    fn from(id: NodeId) -> Self {
        id.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique() {
        let a = NodeId::new();
        let b = NodeId::new();
        assert_ne!(a, b);
        let copy = a;
        assert_eq!(a, copy);
    }

    #[test]
    fn displays_as_uuid() {
        let id = NodeId::new();
        assert_eq!(id.to_string(), id.as_uuid().to_string());
        assert_eq!(Uuid::from(id), *id.as_uuid());
    }
}
