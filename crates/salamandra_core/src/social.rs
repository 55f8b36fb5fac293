//! Friendships between the player and other salamanders.

use crate::config::FriendshipConfig;
use salamandra_data::{GameState, Relationship};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionKind {
    Positive,
    Negative,
}

/// How another salamander reacts to the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    Approach,
    Neutral,
    Avoid,
}

/// Adjusts (or creates) the bond with `other_id` and returns its new value.
pub fn record_interaction<'a>(
    state: &'a mut GameState,
    other_id: &str,
    kind: InteractionKind,
    config: &FriendshipConfig,
) -> &'a Relationship {
    let cycle = state.pond.cycle;
    let delta = match kind {
        InteractionKind::Positive => config.positive_interaction,
        InteractionKind::Negative => config.negative_interaction,
    };

    let index = match state
        .relationships
        .iter()
        .position(|r| r.salamander_id == other_id)
    {
        Some(index) => index,
        None => {
            state.relationships.push(Relationship {
                salamander_id: other_id.to_string(),
                friendship_level: 0.0,
                last_interaction_cycle: cycle,
                interaction_count: 0,
            });
            state.relationships.len() - 1
        }
    };

    let relationship = &mut state.relationships[index];
    relationship.friendship_level = (relationship.friendship_level + delta)
        .clamp(config.min_friendship, config.max_friendship);
    relationship.last_interaction_cycle = cycle;
    relationship.interaction_count += 1;

    tracing::debug!(
        other = other_id,
        friendship = relationship.friendship_level,
        "Interaction recorded"
    );
    relationship
}

#[must_use]
pub fn disposition(relationship: &Relationship, config: &FriendshipConfig) -> Disposition {
    if relationship.friendship_level >= config.approach_threshold {
        Disposition::Approach
    } else if relationship.friendship_level <= config.avoid_threshold {
        Disposition::Avoid
    } else {
        Disposition::Neutral
    }
}

/// Bonds that make it across the end of `ending_cycle`, weakened.
///
/// A bond left untouched fades towards zero by `decay_rate` for every cycle
/// it was neglected before the survival check.
#[must_use]
pub fn prune_relationships(
    relationships: &[Relationship],
    ending_cycle: u32,
    config: &FriendshipConfig,
) -> Vec<Relationship> {
    relationships
        .iter()
        .map(|r| {
            let neglected = ending_cycle.saturating_sub(r.last_interaction_cycle);
            (r, fade(r.friendship_level, f64::from(neglected) * config.decay_rate))
        })
        .filter(|(_, level)| *level > config.survival_threshold)
        .map(|(r, level)| Relationship {
            friendship_level: level * config.carry_over_decay,
            ..r.clone()
        })
        .collect()
}

fn fade(level: f64, amount: f64) -> f64 {
    if level > 0.0 {
        (level - amount).max(0.0)
    } else {
        (level + amount).min(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bond(id: &str, level: f64) -> Relationship {
        Relationship {
            salamander_id: id.to_string(),
            friendship_level: level,
            last_interaction_cycle: 1,
            interaction_count: 3,
        }
    }

    #[test]
    fn test_disposition_thresholds() {
        let config = FriendshipConfig::default();
        assert_eq!(disposition(&bond("a", 3.0), &config), Disposition::Approach);
        assert_eq!(disposition(&bond("a", 2.0), &config), Disposition::Neutral);
        assert_eq!(disposition(&bond("a", -3.0), &config), Disposition::Avoid);
    }

    #[test]
    fn test_prune_keeps_strong_bonds_halved() {
        let config = FriendshipConfig::default();
        let pruned = prune_relationships(
            &[bond("a", 8.0), bond("b", 5.0), bond("c", -9.0), bond("d", 10.0)],
            1,
            &config,
        );
        assert_eq!(pruned.len(), 2);
        assert_eq!(pruned[0].salamander_id, "a");
        assert_eq!(pruned[0].friendship_level, 4.0);
        assert_eq!(pruned[1].friendship_level, 5.0);
        assert_eq!(pruned[1].interaction_count, 3);
    }

    #[test]
    fn test_neglected_bonds_fade() {
        let config = FriendshipConfig::default();
        let bonds = [bond("old", 5.15), bond("steady", 9.0)];

        let pruned = prune_relationships(&bonds, 2, &config);
        assert_eq!(pruned.len(), 2);
        assert!((pruned[0].friendship_level - 2.525).abs() < 1e-9);
        assert!((pruned[1].friendship_level - 4.45).abs() < 1e-9);

        // Two missed cycles drop the old bond under the threshold.
        let pruned = prune_relationships(&bonds, 3, &config);
        assert_eq!(pruned.len(), 1);
        assert_eq!(pruned[0].salamander_id, "steady");
    }

    #[test]
    fn test_fade_stops_at_zero() {
        assert_eq!(fade(0.05, 0.1), 0.0);
        assert_eq!(fade(-0.05, 0.1), 0.0);
        assert!((fade(-4.0, 0.2) + 3.8).abs() < 1e-9);
    }
}
