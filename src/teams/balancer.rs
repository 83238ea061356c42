use std::cmp::Reverse;

use log::debug;

use crate::domain::{Player, Session, Team};

pub const MIN_TEAM_COUNT: usize = 2;
pub const MAX_TEAM_COUNT: usize = 4;

/// Replace the session's teams with a fresh snake draft of the present players.
///
/// Counts outside `MIN_TEAM_COUNT..=MAX_TEAM_COUNT` leave the session untouched.
/// The roster itself is never modified; teams receive copies.
pub fn generate_teams(mut session: Session, team_count: usize) -> Session {
    if !(MIN_TEAM_COUNT..=MAX_TEAM_COUNT).contains(&team_count) {
        debug!("Ignoring team count {} for session {}", team_count, session.id);
        return session;
    }

    let pool: Vec<Player> = session.present_players().cloned().collect();
    session.teams = snake_draft(pool, team_count);

    debug!(
        "Drafted {} players into {} teams for session {}",
        session.teams.iter().map(|t| t.players.len()).sum::<usize>(),
        team_count,
        session.id
    );
    session
}

/// Strongest first; stable so equal weights keep roster order
pub fn snake_draft(mut pool: Vec<Player>, team_count: usize) -> Vec<Team> {
    pool.sort_by_key(|p| Reverse(p.level.weight()));

    let mut teams: Vec<Team> = (1..=team_count)
        .map(|n| Team::empty(format!("Team {}", n)))
        .collect();

    for (index, player) in pool.into_iter().enumerate() {
        teams[snake_slot(index, team_count)].players.push(player);
    }

    teams
}

/// Team receiving the `index`-th pick; direction reverses every full pass
pub fn snake_slot(index: usize, team_count: usize) -> usize {
    let cycle = index / team_count;
    let position = index % team_count;

    if cycle % 2 == 1 {
        (team_count - 1) - position
    } else {
        position
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Gender, SkillLevel};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn player(id: usize, level: SkillLevel, present: bool) -> Player {
        Player {
            id: id.to_string(),
            name: format!("Player {}", id),
            level,
            gender: Gender::Female,
            paid: false,
            present,
        }
    }

    fn weights(team: &Team) -> Vec<u32> {
        team.players.iter().map(|p| p.level.weight()).collect()
    }

    fn sum(team: &Team) -> u32 {
        weights(team).iter().sum()
    }

    #[test]
    fn test_snake_slot_reverses_each_pass() {
        let slots: Vec<usize> = (0..9).map(|i| snake_slot(i, 3)).collect();
        assert_eq!(slots, vec![0, 1, 2, 2, 1, 0, 0, 1, 2]);
    }

    #[test]
    fn test_two_team_draft_membership() {
        let pool: Vec<Player> = SkillLevel::ALL
            .iter()
            .enumerate()
            .map(|(i, level)| player(i, *level, true))
            .collect();

        let teams = snake_draft(pool, 2);

        // picks 0,3,4 go to Team 1 and picks 1,2,5 to Team 2
        assert_eq!(teams[0].name, "Team 1");
        assert_eq!(weights(&teams[0]), vec![6, 3, 2]);
        assert_eq!(weights(&teams[1]), vec![5, 4, 1]);
        assert!(teams.iter().all(|t| t.score == 0));
    }

    #[test]
    fn test_pool_sorted_by_weight_with_stable_ties() {
        let pool = vec![
            player(1, SkillLevel::C, true),
            player(2, SkillLevel::A, true),
            player(3, SkillLevel::C, true),
            player(4, SkillLevel::A, true),
        ];

        let teams = snake_draft(pool, 2);

        let ids: Vec<Vec<&str>> = teams
            .iter()
            .map(|t| t.players.iter().map(|p| p.id.as_str()).collect())
            .collect();
        assert_eq!(ids, vec![vec!["2", "3"], vec!["4", "1"]]);
    }

    #[test]
    fn test_generate_uses_only_present_players() {
        let mut session = Session::new("s1".to_string(), "Gym", Default::default(), 0.0);
        session.players = vec![
            player(1, SkillLevel::A, true),
            player(2, SkillLevel::B, false),
            player(3, SkillLevel::C, true),
        ];
        let roster = session.players.clone();

        let session = generate_teams(session, 3);

        assert_eq!(session.teams.len(), 3);
        assert_eq!(session.teams.iter().map(|t| t.players.len()).sum::<usize>(), 2);
        assert!(session.teams[2].players.is_empty());
        assert_eq!(session.players, roster);
    }

    #[test]
    fn test_generate_replaces_previous_teams() {
        let mut session = Session::new("s1".to_string(), "Gym", Default::default(), 0.0);
        session.players = vec![player(1, SkillLevel::A, true)];
        session.teams = vec![Team { name: "Old".to_string(), players: vec![], score: 9 }];

        let session = generate_teams(session, 2);

        assert_eq!(session.teams[0].name, "Team 1");
        assert_eq!(session.teams[0].score, 0);
    }

    #[test]
    fn test_team_count_below_two_is_a_no_op() {
        let mut session = Session::new("s1".to_string(), "Gym", Default::default(), 0.0);
        session.players = vec![player(1, SkillLevel::A, true)];

        assert_eq!(generate_teams(session.clone(), 1), session);
        assert_eq!(generate_teams(session.clone(), 0), session);
    }

    #[test]
    fn test_team_count_above_four_is_a_no_op() {
        let mut session = Session::new("s1".to_string(), "Gym", Default::default(), 0.0);
        session.players = vec![player(1, SkillLevel::A, true), player(2, SkillLevel::C, true)];

        assert_eq!(generate_teams(session.clone(), 5), session);
        assert_eq!(generate_teams(session.clone(), usize::MAX), session);
        assert_eq!(generate_teams(session, 4).teams.len(), 4);
    }

    #[test]
    fn test_sum_spread_never_exceeds_max_weight() {
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..500 {
            let size = rng.gen_range(0..16);
            let pool: Vec<Player> = (0..size)
                .map(|i| player(i, SkillLevel::ALL[rng.gen_range(0..SkillLevel::ALL.len())], true))
                .collect();
            let max_weight = pool.iter().map(|p| p.level.weight()).max().unwrap_or(0);

            for team_count in MIN_TEAM_COUNT..=MAX_TEAM_COUNT {
                let teams = snake_draft(pool.clone(), team_count);
                let sums: Vec<u32> = teams.iter().map(sum).collect();
                let spread = sums.iter().max().unwrap() - sums.iter().min().unwrap();

                assert!(
                    spread <= max_weight,
                    "spread {} above {} for {:?} into {} teams",
                    spread,
                    max_weight,
                    sums,
                    team_count
                );
            }
        }
    }
}
