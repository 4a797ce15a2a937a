//! Routing groups derived from the queue table.

use tracing::{debug, warn};

use ticket_model::{LookupTable, OutputGroup, OutputGroups};

/// Build one group per name in `names`, in that order.
///
/// Every queue entry whose category equals a group name adds its key to that
/// group's membership. Entries tagged with an unknown category are ignored.
pub fn build_output_groups<S: AsRef<str>>(queues: &LookupTable, names: &[S]) -> OutputGroups {
    let groups: Vec<OutputGroup> = names
        .iter()
        .map(|name| {
            let mut group = OutputGroup::new(name.as_ref());
            group
                .membership
                .extend(queues.keys_for_category(name.as_ref()).map(str::to_string));
            group
        })
        .collect();
    for entry in queues {
        if let Some(category) = entry.category.as_deref()
            && !groups.iter().any(|group| group.name == category)
        {
            debug!(key = %entry.key, category, "queue category is not a report group");
        }
    }
    for group in &groups {
        if group.membership.is_empty() {
            warn!(group = %group.name, "report group has no queue entries");
        }
    }
    OutputGroups { groups }
}
