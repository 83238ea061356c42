use crate::domain::Session;

/// Move one player between (or within) teams.
///
/// Unknown team indices or a stale `from_player_index` leave the session
/// untouched. The player lands at `to_player_index` when that is a valid
/// insertion point in the destination after removal, otherwise at the end.
pub fn move_player_between_teams(
    mut session: Session,
    from_team: usize,
    to_team: usize,
    from_player_index: usize,
    to_player_index: Option<usize>,
) -> Session {
    let team_count = session.teams.len();
    if from_team >= team_count || to_team >= team_count {
        return session;
    }

    let source = &mut session.teams[from_team].players;
    if from_player_index >= source.len() {
        return session;
    }
    let moved = source.remove(from_player_index);

    let destination = &mut session.teams[to_team].players;
    match to_player_index {
        Some(index) if index <= destination.len() => destination.insert(index, moved),
        _ => destination.push(moved),
    }

    session
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Gender, Player, SkillLevel, Team};

    fn team(name: &str, ids: &[&str]) -> Team {
        let players = ids
            .iter()
            .map(|id| Player {
                id: id.to_string(),
                name: id.to_string(),
                level: SkillLevel::B,
                gender: Gender::Male,
                paid: false,
                present: true,
            })
            .collect();
        Team {
            name: name.to_string(),
            players,
            score: 0,
        }
    }

    fn session_with_teams() -> Session {
        let mut session = Session::new("s1".to_string(), "Gym", Default::default(), 0.0);
        session.teams = vec![team("Team 1", &["a", "b", "c"]), team("Team 2", &["x", "y"])];
        session
    }

    fn ids(session: &Session, team: usize) -> Vec<&str> {
        session.teams[team].players.iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn test_move_without_target_appends() {
        let session = move_player_between_teams(session_with_teams(), 0, 1, 0, None);

        assert_eq!(ids(&session, 0), vec!["b", "c"]);
        assert_eq!(ids(&session, 1), vec!["x", "y", "a"]);
        assert_eq!(session.teams.iter().map(|t| t.players.len()).sum::<usize>(), 5);
    }

    #[test]
    fn test_move_inserts_at_target() {
        let session = move_player_between_teams(session_with_teams(), 0, 1, 2, Some(1));

        assert_eq!(ids(&session, 1), vec!["x", "c", "y"]);
    }

    #[test]
    fn test_out_of_range_target_appends() {
        let session = move_player_between_teams(session_with_teams(), 1, 0, 0, Some(10));

        assert_eq!(ids(&session, 0), vec!["a", "b", "c", "x"]);
    }

    #[test]
    fn test_move_within_team_reorders() {
        let session = move_player_between_teams(session_with_teams(), 0, 0, 0, Some(2));

        assert_eq!(ids(&session, 0), vec!["b", "c", "a"]);
    }

    #[test]
    fn test_stale_indices_are_no_ops() {
        let original = session_with_teams();

        assert_eq!(move_player_between_teams(original.clone(), 0, 1, 3, None), original);
        assert_eq!(move_player_between_teams(original.clone(), 2, 1, 0, None), original);
        assert_eq!(move_player_between_teams(original.clone(), 0, 5, 0, Some(0)), original);
    }
}
