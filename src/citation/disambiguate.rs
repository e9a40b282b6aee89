use tracing::{debug, warn};

use super::resolve::SourceRegistry;
use crate::model::SourceId;

pub const DUPLICATE_WARNING: &str = "This source may be a duplicate.";

pub fn disambiguate(registry: &mut SourceRegistry, ids: &[SourceId]) {
    for (base_name, group) in group_by_name(registry, ids) {
        if group.len() == 1 {
            continue;
        }

        for &id in &group {
            let unique_token = {
                let tokens = &registry.get(id).normalized_tokens;
                tokens
                    .iter()
                    .find(|token| {
                        group
                            .iter()
                            .filter(|&&other| other != id)
                            .all(|&other| !registry.get(other).normalized_tokens.contains(token))
                    })
                    .cloned()
            };

            let mut candidate = match &unique_token {
                Some(token) => registry.postprocess(&format!("{base_name} {token}")),
                None => {
                    warn!(name = %base_name, "source may be a duplicate");
                    registry.get_mut(id).warnings.push(DUPLICATE_WARNING.to_string());
                    base_name.clone()
                }
            };

            while ids.iter().any(|&other| registry.get(other).name == candidate) {
                candidate.push('\'');
            }

            debug!(from = %base_name, to = %candidate, "renamed source");
            registry.get_mut(id).name = candidate;
        }
    }
}

fn group_by_name(registry: &SourceRegistry, ids: &[SourceId]) -> Vec<(String, Vec<SourceId>)> {
    let mut groups: Vec<(String, Vec<SourceId>)> = Vec::new();

    for &id in ids {
        let name = &registry.get(id).name;
        match groups.iter_mut().find(|(existing, _)| existing == name) {
            Some((_, members)) => {
                if !members.contains(&id) {
                    members.push(id);
                }
            }
            None => groups.push((name.clone(), vec![id])),
        }
    }

    groups
}
