use crate::error::Result;
use crate::types::{PromotionAction, PromotionChoice, Track, LATEST_TRACK};

/// Derive the promotion action for `choice` on `ref_name`.
///
/// Refs listed in `default_branches` promote within the `latest` track;
/// any other ref promotes within a track of the same name. Fails with
/// `InvalidChoice` before anything else is computed.
pub fn resolve(
    choice: &str,
    ref_name: &str,
    default_branches: &[String],
) -> Result<PromotionAction> {
    let choice: PromotionChoice = choice.parse()?;
    Ok(choice.resolve(ref_name, default_branches))
}

/// A ref literally named `latest` names the latest track too.
pub fn track_for(ref_name: &str, default_branches: &[String]) -> Track {
    if ref_name == LATEST_TRACK || default_branches.iter().any(|b| b == ref_name) {
        Track::Latest
    } else {
        Track::Named(ref_name.to_string())
    }
}

impl PromotionChoice {
    pub fn resolve(self, ref_name: &str, default_branches: &[String]) -> PromotionAction {
        let (from_channel, to_channel) = self.channels();
        PromotionAction {
            from_channel,
            to_channel,
            track: track_for(ref_name, default_branches),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PromoteError;
    use crate::types::Channel;

    fn main_only() -> Vec<String> {
        vec!["main".to_string()]
    }

    #[test]
    fn lookup_table() {
        let cases = [
            ("edge -> beta", Channel::Edge, Channel::Beta),
            ("beta -> candidate", Channel::Beta, Channel::Candidate),
            ("candidate -> stable", Channel::Candidate, Channel::Stable),
        ];
        for (choice, from, to) in cases {
            let action = resolve(choice, "main", &main_only()).unwrap();
            assert_eq!(action.from_channel, from, "{choice}");
            assert_eq!(action.to_channel, to, "{choice}");
        }
    }

    #[test]
    fn default_branch_maps_to_latest() {
        let action = resolve("beta -> candidate", "main", &main_only()).unwrap();
        assert_eq!(
            action,
            PromotionAction {
                from_channel: Channel::Beta,
                to_channel: Channel::Candidate,
                track: Track::Latest,
            }
        );
    }

    #[test]
    fn other_ref_is_used_verbatim() {
        let action = resolve("edge -> beta", "1.6", &main_only()).unwrap();
        assert_eq!(action.track, Track::Named("1.6".to_string()));
        assert_eq!(action.from_channel, Channel::Edge);
        assert_eq!(action.to_channel, Channel::Beta);
    }

    #[test]
    fn multiple_default_branches() {
        let defaults = vec!["main".to_string(), "master".to_string()];
        assert_eq!(track_for("master", &defaults), Track::Latest);
        assert_eq!(track_for("develop", &defaults), Track::Named("develop".to_string()));
    }

    #[test]
    fn empty_default_set_never_yields_latest() {
        assert_eq!(track_for("main", &[]), Track::Named("main".to_string()));
    }

    #[test]
    fn ref_named_latest_survives_serialization() {
        let action = resolve("edge -> beta", "latest", &main_only()).unwrap();
        assert_eq!(action.track, Track::Latest);
        let json = serde_json::to_string(&action).unwrap();
        let parsed: PromotionAction = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, action);
    }

    #[test]
    fn unrecognized_choice_fails() {
        let err = resolve("stable -> edge", "main", &main_only()).unwrap_err();
        assert!(matches!(err, PromoteError::InvalidChoice(s) if s == "stable -> edge"));
    }

    #[test]
    fn resolve_is_idempotent() {
        let a = resolve("candidate -> stable", "1.6", &main_only()).unwrap();
        let b = resolve("candidate -> stable", "1.6", &main_only()).unwrap();
        assert_eq!(a, b);
    }
}
