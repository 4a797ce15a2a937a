use std::collections::BTreeSet;

/// A named report sheet and the queue labels routed into it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputGroup {
    pub name: String,
    pub membership: BTreeSet<String>,
}

impl OutputGroup {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            membership: BTreeSet::new(),
        }
    }

    pub fn accepts(&self, queue: &str) -> bool {
        self.membership.contains(queue)
    }
}

/// Routing groups in configuration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputGroups {
    pub groups: Vec<OutputGroup>,
}

impl OutputGroups {
    pub fn iter(&self) -> std::slice::Iter<'_, OutputGroup> {
        self.groups.iter()
    }

    pub fn get(&self, name: &str) -> Option<&OutputGroup> {
        self.groups.iter().find(|group| group.name == name)
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
