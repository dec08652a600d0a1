use rand::rngs::StdRng;
use rand::SeedableRng;

use impostor_arena::models::error::{ChatError, LobbyError, RoundError, VoteError};
use impostor_arena::models::location::Location;
use impostor_arena::models::player::{Player, PlayerKind};
use impostor_arena::models::role::Team;
use impostor_arena::models::session::{GamePhase, GameSettings, Session};
use impostor_arena::services::{
    discussion_service, lobby_service, night_service, vote_service,
};
use impostor_arena::state::AppState;
use impostor_arena::utils::test_setup::{lobby_with_players, manual_settings, started_session};

fn one_impostor() -> GameSettings {
    GameSettings {
        impostor_count: 1,
        ..manual_settings()
    }
}

/// The timer entry points double as manual phase drivers for tests.
async fn drive_to_vote(state: &AppState, session_id: &str, round: u32) {
    vote_service::start_vote(state, session_id, round)
        .await
        .unwrap();
    let session = state.store.get(session_id).await.unwrap();
    assert_eq!(session.phase, GamePhase::Vote);
}

async fn drive_night_to_vote(state: &AppState, session_id: &str, round: u32) {
    night_service::execute_night_auto(state, session_id, round)
        .await
        .unwrap();
    drive_to_vote(state, session_id, round).await;
}

#[tokio::test]
async fn roles_are_dealt_to_the_configured_counts() {
    let state = AppState::new();
    let game = started_session(
        &state,
        manual_settings(),
        &["Ada", "Grace", "Edsger", "Barbara", "Alan", "Tony"],
    )
    .await;

    assert_eq!(game.impostors.len(), 2);
    assert_eq!(game.crew.len(), 4);

    let session = state.store.get(&game.session_id).await.unwrap();
    assert!(session.players.iter().all(|p| p.role.is_some()));
    assert_eq!(session.round, 1);
    assert!(session
        .players
        .iter()
        .all(|p| p.location == Location::Cafeteria));
}

#[test]
fn role_deal_is_roughly_uniform_across_seats() {
    let settings = GameSettings {
        impostor_count: 2,
        ..GameSettings::default()
    };
    let mut session = Session::new(
        "sim".to_string(),
        "SIMCOD".to_string(),
        settings,
        Player::new("p0".to_string(), PlayerKind::Human),
    );
    for i in 1..5 {
        session
            .players
            .push(Player::new(format!("p{}", i), PlayerKind::Human));
    }

    let trials = 2000usize;
    let mut impostor_draws = vec![0usize; 5];
    for trial in 0..trials {
        let mut rng = StdRng::seed_from_u64(trial as u64);
        session.assign_roles(&mut rng);
        for (seat, p) in session.players.iter().enumerate() {
            if p.is_impostor() {
                impostor_draws[seat] += 1;
            }
        }
    }

    assert_eq!(impostor_draws.iter().sum::<usize>(), trials * 2);
    // expectation is 2/5 of trials per seat; allow a generous band
    for (seat, draws) in impostor_draws.iter().enumerate() {
        assert!(
            (600usize..=1000).contains(draws),
            "seat {} drew impostor {} times out of {}",
            seat,
            draws,
            trials
        );
    }
}

#[tokio::test]
async fn a_dead_player_is_rejected_in_every_phase() {
    let state = AppState::new();
    let game = started_session(&state, one_impostor(), &["Ada", "Grace", "Edsger", "Barbara"])
        .await;
    let imp = &game.impostors[0];
    let victim = &game.crew[0];
    let reporter = &game.crew[1];

    night_service::execute_kill(&state, &game.session_id, imp, victim)
        .await
        .unwrap();

    // still night
    assert_eq!(
        night_service::move_player(&state, &game.session_id, victim, Location::Weapons)
            .await
            .unwrap_err(),
        RoundError::PlayerDead
    );
    assert_eq!(
        night_service::vent(&state, &game.session_id, victim)
            .await
            .unwrap_err(),
        RoundError::PlayerDead
    );
    assert_eq!(
        night_service::complete_task(&state, &game.session_id, victim, "swipe_card")
            .await
            .unwrap_err(),
        RoundError::PlayerDead
    );
    assert_eq!(
        night_service::execute_kill(&state, &game.session_id, victim, reporter)
            .await
            .unwrap_err(),
        RoundError::PlayerDead
    );
    assert_eq!(
        night_service::report_body(&state, &game.session_id, victim, victim)
            .await
            .unwrap_err(),
        RoundError::PlayerDead
    );

    night_service::report_body(&state, &game.session_id, reporter, victim)
        .await
        .unwrap();
    assert_eq!(
        discussion_service::add_message(&state, &game.session_id, victim, "boo".to_string())
            .await
            .unwrap_err(),
        ChatError::PlayerDead
    );

    drive_to_vote(&state, &game.session_id, 1).await;
    assert_eq!(
        vote_service::cast_vote(&state, &game.session_id, victim, None)
            .await
            .unwrap_err(),
        VoteError::PlayerDead
    );
}

#[tokio::test]
async fn kills_validate_killer_and_target() {
    let state = AppState::new();
    let game = started_session(
        &state,
        one_impostor(),
        &["Ada", "Grace", "Edsger", "Barbara", "Alan"],
    )
    .await;
    let imp = &game.impostors[0];
    let (c0, c1) = (&game.crew[0], &game.crew[1]);

    // crew have no kill
    assert_eq!(
        night_service::execute_kill(&state, &game.session_id, c0, c1)
            .await
            .unwrap_err(),
        RoundError::InvalidTarget
    );
    // no self-kill
    assert_eq!(
        night_service::execute_kill(&state, &game.session_id, imp, imp)
            .await
            .unwrap_err(),
        RoundError::InvalidTarget
    );

    // a target in another room is out of reach
    night_service::move_player(&state, &game.session_id, c0, Location::Weapons)
        .await
        .unwrap();
    assert_eq!(
        night_service::execute_kill(&state, &game.session_id, imp, c0)
            .await
            .unwrap_err(),
        RoundError::InvalidTarget
    );

    // no killing from inside a vent
    night_service::vent(&state, &game.session_id, imp).await.unwrap();
    assert_eq!(
        night_service::execute_kill(&state, &game.session_id, imp, c1)
            .await
            .unwrap_err(),
        RoundError::InvalidTarget
    );
    night_service::vent(&state, &game.session_id, imp).await.unwrap();

    night_service::execute_kill(&state, &game.session_id, imp, c1)
        .await
        .unwrap();
    let session = state.store.get(&game.session_id).await.unwrap();
    assert!(session.player(c1).unwrap().is_dead);
    assert_eq!(session.phase, GamePhase::Night);
    assert_eq!(session.kills.len(), 1);
    assert!(!session.kills[0].reported);

    // the dead die once
    assert_eq!(
        night_service::execute_kill(&state, &game.session_id, imp, c1)
            .await
            .unwrap_err(),
        RoundError::InvalidTarget
    );
}

#[tokio::test]
async fn impostors_cannot_kill_each_other() {
    let state = AppState::new();
    let game = started_session(
        &state,
        manual_settings(),
        &["Ada", "Grace", "Edsger", "Barbara", "Alan", "Tony"],
    )
    .await;
    assert_eq!(
        night_service::execute_kill(
            &state,
            &game.session_id,
            &game.impostors[0],
            &game.impostors[1]
        )
        .await
        .unwrap_err(),
        RoundError::InvalidTarget
    );
}

#[tokio::test]
async fn a_kill_at_parity_ends_the_game() {
    let state = AppState::new();
    let game = started_session(&state, one_impostor(), &["Ada", "Grace", "Edsger", "Barbara"])
        .await;
    let imp = &game.impostors[0];

    night_service::execute_kill(&state, &game.session_id, imp, &game.crew[0])
        .await
        .unwrap();
    let session = state.store.get(&game.session_id).await.unwrap();
    assert_eq!(session.phase, GamePhase::Night);
    assert_eq!(session.winner, None);

    // one impostor against two crew kills again: parity
    night_service::execute_kill(&state, &game.session_id, imp, &game.crew[1])
        .await
        .unwrap();
    let session = state.store.get(&game.session_id).await.unwrap();
    assert_eq!(session.phase, GamePhase::GameOver);
    assert_eq!(session.winner, Some(Team::Impostors));
    assert!(session.players.iter().all(|p| p.revealed));

    // nothing moves after game over
    assert_eq!(
        night_service::execute_kill(&state, &game.session_id, imp, &game.crew[2])
            .await
            .unwrap_err(),
        RoundError::WrongPhase
    );
}

#[tokio::test]
async fn a_strict_plurality_eliminates_its_target() {
    let state = AppState::new();
    let game = started_session(
        &state,
        one_impostor(),
        &["Ada", "Grace", "Edsger", "Barbara", "Alan", "Tony"],
    )
    .await;
    let imp = &game.impostors[0];
    let c = &game.crew;

    drive_night_to_vote(&state, &game.session_id, 1).await;

    // 3 for c[0], 2 for c[1], 1 skip
    for voter in [&c[1], &c[2], &c[3]] {
        vote_service::cast_vote(&state, &game.session_id, voter, Some(c[0].clone()))
            .await
            .unwrap();
    }
    for voter in [&c[4], &c[0]] {
        vote_service::cast_vote(&state, &game.session_id, voter, Some(c[1].clone()))
            .await
            .unwrap();
    }
    vote_service::cast_vote(&state, &game.session_id, imp, None)
        .await
        .unwrap();

    // the sixth ballot finalized the vote early
    let session = state.store.get(&game.session_id).await.unwrap();
    let ejected = session.player(&c[0]).unwrap();
    assert!(ejected.is_dead);
    assert!(ejected.revealed);
    assert_eq!(session.phase, GamePhase::Night);
    assert_eq!(session.round, 2);

    // the verdict is on the record
    assert!(session
        .chat
        .messages
        .iter()
        .any(|m| m.text.contains("was ejected")));
}

#[tokio::test]
async fn a_tie_eliminates_no_one() {
    let state = AppState::new();
    let game = started_session(&state, one_impostor(), &["Ada", "Grace", "Edsger", "Barbara"])
        .await;
    let imp = &game.impostors[0];
    let c = &game.crew;

    drive_night_to_vote(&state, &game.session_id, 1).await;

    // 2 for c[0], 2 for c[1]
    vote_service::cast_vote(&state, &game.session_id, &c[1], Some(c[0].clone()))
        .await
        .unwrap();
    vote_service::cast_vote(&state, &game.session_id, &c[2], Some(c[0].clone()))
        .await
        .unwrap();
    vote_service::cast_vote(&state, &game.session_id, &c[0], Some(c[1].clone()))
        .await
        .unwrap();
    vote_service::cast_vote(&state, &game.session_id, imp, Some(c[1].clone()))
        .await
        .unwrap();

    let session = state.store.get(&game.session_id).await.unwrap();
    assert!(session.players.iter().all(|p| p.is_alive()));
    assert_eq!(session.phase, GamePhase::Night);
    assert_eq!(session.round, 2);
}

#[tokio::test]
async fn a_skip_plurality_eliminates_no_one() {
    let state = AppState::new();
    let game = started_session(
        &state,
        one_impostor(),
        &["Ada", "Grace", "Edsger", "Barbara", "Alan"],
    )
    .await;
    let imp = &game.impostors[0];
    let c = &game.crew;

    drive_night_to_vote(&state, &game.session_id, 1).await;

    for voter in [imp, &c[0], &c[1], &c[2]] {
        vote_service::cast_vote(&state, &game.session_id, voter, None)
            .await
            .unwrap();
    }
    vote_service::cast_vote(&state, &game.session_id, &c[3], Some(c[0].clone()))
        .await
        .unwrap();

    let session = state.store.get(&game.session_id).await.unwrap();
    assert!(session.players.iter().all(|p| p.is_alive()));
    assert_eq!(session.round, 2);
}

#[tokio::test]
async fn votes_validate_target_and_phase_and_revotes_overwrite() {
    let state = AppState::new();
    let game = started_session(&state, one_impostor(), &["Ada", "Grace", "Edsger", "Barbara"])
        .await;
    let imp = &game.impostors[0];
    let c = &game.crew;

    // voting is for the vote phase
    assert_eq!(
        vote_service::cast_vote(&state, &game.session_id, &c[0], None)
            .await
            .unwrap_err(),
        VoteError::WrongPhase
    );

    night_service::execute_kill(&state, &game.session_id, imp, &c[0])
        .await
        .unwrap();
    night_service::report_body(&state, &game.session_id, &c[1], &c[0])
        .await
        .unwrap();
    drive_to_vote(&state, &game.session_id, 1).await;

    assert_eq!(
        vote_service::cast_vote(
            &state,
            &game.session_id,
            &c[1],
            Some("nobody-here".to_string())
        )
        .await
        .unwrap_err(),
        VoteError::InvalidTarget
    );
    // the dead are not candidates
    assert_eq!(
        vote_service::cast_vote(&state, &game.session_id, &c[1], Some(c[0].clone()))
            .await
            .unwrap_err(),
        VoteError::InvalidTarget
    );

    // self-votes are legal, and a re-vote replaces the ballot
    vote_service::cast_vote(&state, &game.session_id, &c[1], Some(c[1].clone()))
        .await
        .unwrap();
    vote_service::cast_vote(&state, &game.session_id, &c[1], None)
        .await
        .unwrap();
    let session = state.store.get(&game.session_id).await.unwrap();
    assert_eq!(session.votes.ballots.len(), 1);

    vote_service::cast_vote(&state, &game.session_id, &c[2], None)
        .await
        .unwrap();
    vote_service::cast_vote(&state, &game.session_id, imp, None)
        .await
        .unwrap();

    let session = state.store.get(&game.session_id).await.unwrap();
    assert_eq!(session.phase, GamePhase::Night);
    assert_eq!(session.round, 2);
    assert_eq!(session.living().count(), 3);
}

#[tokio::test]
async fn a_second_finalize_is_a_no_op() {
    let state = AppState::new();
    let game = started_session(&state, one_impostor(), &["Ada", "Grace", "Edsger", "Barbara"])
        .await;
    let c = &game.crew;

    drive_night_to_vote(&state, &game.session_id, 1).await;
    for voter in [&game.impostors[0], &c[0], &c[1]] {
        vote_service::cast_vote(&state, &game.session_id, voter, Some(c[2].clone()))
            .await
            .unwrap();
    }
    vote_service::cast_vote(&state, &game.session_id, &c[2], None)
        .await
        .unwrap();

    let session = state.store.get(&game.session_id).await.unwrap();
    assert_eq!(session.round, 2);
    let deaths = session.players.iter().filter(|p| p.is_dead).count();
    assert_eq!(deaths, 1);

    // the vote timer for round 1 fires late and changes nothing
    vote_service::finalize_votes(&state, &game.session_id, 1)
        .await
        .unwrap();
    let session = state.store.get(&game.session_id).await.unwrap();
    assert_eq!(session.round, 2);
    assert_eq!(session.players.iter().filter(|p| p.is_dead).count(), deaths);
}

#[tokio::test]
async fn ejecting_the_last_impostor_wins_for_crew() {
    let state = AppState::new();
    let game = started_session(&state, one_impostor(), &["Ada", "Grace", "Edsger", "Barbara"])
        .await;
    let imp = &game.impostors[0];

    drive_night_to_vote(&state, &game.session_id, 1).await;
    for voter in game.crew.iter() {
        vote_service::cast_vote(&state, &game.session_id, voter, Some(imp.clone()))
            .await
            .unwrap();
    }
    vote_service::cast_vote(&state, &game.session_id, imp, None)
        .await
        .unwrap();

    let session = state.store.get(&game.session_id).await.unwrap();
    assert_eq!(session.phase, GamePhase::GameOver);
    assert_eq!(session.winner, Some(Team::Crew));
    assert!(session.player(imp).unwrap().is_dead);
    assert!(session.players.iter().all(|p| p.revealed));
}

#[tokio::test]
async fn body_reports_validate_record_and_location() {
    let state = AppState::new();
    let game = started_session(
        &state,
        one_impostor(),
        &["Ada", "Grace", "Edsger", "Barbara", "Alan"],
    )
    .await;
    let imp = &game.impostors[0];
    let c = &game.crew;

    night_service::execute_kill(&state, &game.session_id, imp, &c[0])
        .await
        .unwrap();

    // a living player is not a body
    assert_eq!(
        night_service::report_body(&state, &game.session_id, &c[1], &c[2])
            .await
            .unwrap_err(),
        RoundError::InvalidTarget
    );

    // reporting needs line of sight: same room as the body
    night_service::move_player(&state, &game.session_id, &c[1], Location::Weapons)
        .await
        .unwrap();
    assert_eq!(
        night_service::report_body(&state, &game.session_id, &c[1], &c[0])
            .await
            .unwrap_err(),
        RoundError::InvalidTarget
    );

    night_service::report_body(&state, &game.session_id, &c[2], &c[0])
        .await
        .unwrap();
    let session = state.store.get(&game.session_id).await.unwrap();
    assert_eq!(session.phase, GamePhase::Discussion);
    assert!(session.kills[0].reported);
    assert!(session
        .chat
        .messages
        .iter()
        .any(|m| m.text.contains("body")));

    // next round, the old body cannot be reported again
    drive_to_vote(&state, &game.session_id, 1).await;
    for voter in [imp, &c[1], &c[2], &c[3]] {
        vote_service::cast_vote(&state, &game.session_id, voter, None)
            .await
            .unwrap();
    }
    let session = state.store.get(&game.session_id).await.unwrap();
    assert_eq!(session.phase, GamePhase::Night);
    assert_eq!(session.round, 2);
    assert_eq!(
        night_service::report_body(&state, &game.session_id, &c[2], &c[0])
            .await
            .unwrap_err(),
        RoundError::BodyAlreadyReported
    );
}

#[tokio::test]
async fn the_night_ends_on_its_own() {
    let state = AppState::new();
    let settings = GameSettings {
        impostor_count: 1,
        night_secs: 1,
        discussion_secs: 600,
        vote_secs: 600,
        ..GameSettings::default()
    };
    let game = started_session(&state, settings, &["Ada", "Grace", "Edsger", "Barbara"]).await;

    tokio::time::sleep(std::time::Duration::from_millis(1500)).await;

    let session = state.store.get(&game.session_id).await.unwrap();
    assert_eq!(session.phase, GamePhase::Discussion);
    assert_eq!(session.round, 1);

    // a late duplicate of the same transition is harmless
    night_service::execute_night_auto(&state, &game.session_id, 1)
        .await
        .unwrap();
    let session = state.store.get(&game.session_id).await.unwrap();
    assert_eq!(session.phase, GamePhase::Discussion);
    assert_eq!(session.chat.messages.len(), 1);
}

#[tokio::test]
async fn lobby_leaves_migrate_the_host_and_empty_lobbies_vanish() {
    let state = AppState::new();
    let lobby = lobby_with_players(&state, manual_settings(), &["Ada", "Grace", "Edsger"]).await;

    assert_eq!(
        lobby_service::remove_player(&state, &lobby.session_id, "nobody")
            .await
            .unwrap_err(),
        LobbyError::PlayerNotFound
    );

    lobby_service::remove_player(&state, &lobby.session_id, &lobby.host_id)
        .await
        .unwrap();
    let session = state.store.get(&lobby.session_id).await.unwrap();
    assert_eq!(session.players.len(), 2);
    assert_eq!(session.host_id, lobby.player_ids[1]);
    assert!(session.player(&lobby.player_ids[1]).unwrap().is_host);

    lobby_service::remove_player(&state, &lobby.session_id, &lobby.player_ids[1])
        .await
        .unwrap();
    lobby_service::remove_player(&state, &lobby.session_id, &lobby.player_ids[2])
        .await
        .unwrap();
    assert!(state.store.get(&lobby.session_id).await.is_err());
}

#[tokio::test]
async fn a_mid_game_leave_counts_as_a_death() {
    let state = AppState::new();
    let game = started_session(&state, one_impostor(), &["Ada", "Grace", "Edsger", "Barbara"])
        .await;

    lobby_service::remove_player(&state, &game.session_id, &game.impostors[0])
        .await
        .unwrap();

    let session = state.store.get(&game.session_id).await.unwrap();
    // the seat stays, the player is dead, and crew win on the spot
    assert_eq!(session.players.len(), 4);
    assert!(session.player(&game.impostors[0]).unwrap().is_dead);
    assert_eq!(session.phase, GamePhase::GameOver);
    assert_eq!(session.winner, Some(Team::Crew));
}

#[tokio::test]
async fn phase_durations_are_bounded_at_creation() {
    let state = AppState::new();

    // a duration this large would blow up the deadline arithmetic later
    let oversized = GameSettings {
        night_secs: 10_000_000_000_000_000,
        ..manual_settings()
    };
    assert_eq!(
        lobby_service::create_session(&state, oversized, "Ada".to_string(), PlayerKind::Human)
            .await
            .unwrap_err(),
        LobbyError::InvalidSettings
    );

    let zeroed = GameSettings {
        vote_secs: 0,
        ..manual_settings()
    };
    assert_eq!(
        lobby_service::create_session(&state, zeroed, "Ada".to_string(), PlayerKind::Human)
            .await
            .unwrap_err(),
        LobbyError::InvalidSettings
    );

    assert!(lobby_service::list_sessions(&state).await.is_empty());
}

#[tokio::test]
async fn movement_follows_adjacency_and_vents_are_impostor_only() {
    let state = AppState::new();
    let game = started_session(&state, one_impostor(), &["Ada", "Grace", "Edsger", "Barbara"])
        .await;
    let imp = &game.impostors[0];
    let c = &game.crew;

    night_service::move_player(&state, &game.session_id, &c[0], Location::Weapons)
        .await
        .unwrap();
    night_service::move_player(&state, &game.session_id, &c[0], Location::Navigation)
        .await
        .unwrap();
    // Navigation does not open onto the cafeteria
    assert_eq!(
        night_service::move_player(&state, &game.session_id, &c[0], Location::Cafeteria)
            .await
            .unwrap_err(),
        RoundError::InvalidTarget
    );
    let session = state.store.get(&game.session_id).await.unwrap();
    assert_eq!(session.player(&c[0]).unwrap().location, Location::Navigation);

    assert_eq!(
        night_service::vent(&state, &game.session_id, &c[1])
            .await
            .unwrap_err(),
        RoundError::NotImpostor
    );
    night_service::vent(&state, &game.session_id, imp).await.unwrap();
    let session = state.store.get(&game.session_id).await.unwrap();
    assert!(session.player(imp).unwrap().in_vent);

    // moving steps out of the vent
    night_service::move_player(&state, &game.session_id, imp, Location::Storage)
        .await
        .unwrap();
    let session = state.store.get(&game.session_id).await.unwrap();
    assert!(!session.player(imp).unwrap().in_vent);
}

#[tokio::test]
async fn tasks_are_room_bound_bookkeeping() {
    let state = AppState::new();
    let game = started_session(&state, one_impostor(), &["Ada", "Grace", "Edsger", "Barbara"])
        .await;
    let imp = &game.impostors[0];
    let c = &game.crew;

    night_service::complete_task(&state, &game.session_id, &c[0], "swipe_card")
        .await
        .unwrap();
    // wrong room
    assert_eq!(
        night_service::complete_task(&state, &game.session_id, &c[0], "fix_wiring")
            .await
            .unwrap_err(),
        RoundError::InvalidTarget
    );
    // unknown task
    assert_eq!(
        night_service::complete_task(&state, &game.session_id, &c[0], "paint_hull")
            .await
            .unwrap_err(),
        RoundError::InvalidTarget
    );
    // impostors may fake tasks
    night_service::complete_task(&state, &game.session_id, imp, "empty_garbage")
        .await
        .unwrap();

    let session = state.store.get(&game.session_id).await.unwrap();
    assert!(session.tasks_done[&c[0]].contains("swipe_card"));
    assert!(session.tasks_done[imp].contains("empty_garbage"));
    // task progress never decides anything
    assert_eq!(session.winner, None);
    assert_eq!(session.phase, GamePhase::Night);
}

#[tokio::test]
async fn chat_is_open_only_while_the_table_talks() {
    let state = AppState::new();
    let game = started_session(&state, one_impostor(), &["Ada", "Grace", "Edsger", "Barbara"])
        .await;
    let c = &game.crew;

    assert_eq!(
        discussion_service::add_message(&state, &game.session_id, &c[0], "hi".to_string())
            .await
            .unwrap_err(),
        ChatError::WrongPhase
    );

    night_service::execute_night_auto(&state, &game.session_id, 1)
        .await
        .unwrap();
    discussion_service::add_message(&state, &game.session_id, &c[0], "who is sus".to_string())
        .await
        .unwrap();

    // the ballot box closes the floor
    drive_to_vote(&state, &game.session_id, 1).await;
    assert_eq!(
        discussion_service::add_message(&state, &game.session_id, &c[1], "voting Ada".to_string())
            .await
            .unwrap_err(),
        ChatError::WrongPhase
    );

    let session = state.store.get(&game.session_id).await.unwrap();
    let player_lines: Vec<&str> = session
        .chat
        .messages
        .iter()
        .filter(|m| !matches!(m.sender, impostor_arena::models::chat::Sender::System))
        .map(|m| m.text.as_str())
        .collect();
    assert_eq!(player_lines, vec!["who is sus"]);
}
