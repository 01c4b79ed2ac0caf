//! Integration tests for the game manager.

use std::sync::Arc;
use std::thread;

use crossword_engine::{
    Dictionary, GameError, GameErrorKind, GameStatus, Letter, MatcherKind, PlacementOutcome,
    PlayerId, Scorer,
};
use crossword_server::{GameManager, GameStore, InMemoryGameStore};

fn manager_with(words: &[&str]) -> GameManager {
    let scorer = Scorer::from_dictionary(MatcherKind::Trie, Dictionary::from_words(words));
    GameManager::in_memory(Arc::new(scorer), 10)
}

#[test]
fn test_two_by_two_first_round() {
    let manager = manager_with(&["at"]);
    let p0 = PlayerId::new("P0");
    let p1 = PlayerId::new("P1");
    let id = manager
        .create_game(vec![p0.clone(), p1.clone()], 2)
        .expect("Failed to create game");

    let game = manager.game_state(&id).expect("state");
    assert_eq!(game.status(), GameStatus::AwaitingAnnouncement);
    assert_eq!(game.current_announcing_player(), &p0);

    manager.submit_announcement(&id, &p0, "A").expect("announce");
    let game = manager.game_state(&id).expect("state");
    let a = Letter::try_from('A').expect("letter");
    assert_eq!(game.status(), GameStatus::AwaitingPlacement { letter: a });
    assert_eq!(game.current_announcing_player(), &p1);

    assert_eq!(
        manager.submit_placement(&id, &p0, 0, 0).expect("place"),
        PlacementOutcome::AwaitingOthers
    );
    assert_eq!(
        manager.submit_placement(&id, &p1, 1, 1).expect("place"),
        PlacementOutcome::RoundComplete
    );

    let game = manager.game_state(&id).expect("state");
    assert_eq!(game.squares_filled(), 1);
    assert_eq!(game.status(), GameStatus::AwaitingAnnouncement);
    for player in [&p0, &p1] {
        assert_eq!(manager.player_board(&id, player).expect("board").filled_squares(), 1);
    }

    let err = manager.player_score(&id, &p0).unwrap_err();
    assert!(matches!(err, GameError::InvalidAction { .. }));
}

#[test]
fn test_full_game_and_scores() {
    let manager = manager_with(&["at", "to", "ox"]);
    let p0 = PlayerId::new("P0");
    let p1 = PlayerId::new("P1");
    let id = manager
        .create_game(vec![p0.clone(), p1.clone()], 2)
        .expect("Failed to create game");

    // P0 builds rows AT / OX; P1 builds columns AT / OX.
    let rounds = [
        (&p0, "a", (0, 0), (0, 0)),
        (&p1, "t", (0, 1), (1, 0)),
        (&p0, "o", (1, 0), (0, 1)),
        (&p1, "x", (1, 1), (1, 1)),
    ];
    let mut last = PlacementOutcome::AwaitingOthers;
    for (announcer, letter, p0_square, p1_square) in rounds {
        manager.submit_announcement(&id, announcer, letter).expect("announce");
        manager
            .submit_placement(&id, &p0, p0_square.0, p0_square.1)
            .expect("place");
        last = manager
            .submit_placement(&id, &p1, p1_square.0, p1_square.1)
            .expect("place");
    }
    assert_eq!(last, PlacementOutcome::Finished);

    let p0_score = manager.player_score(&id, &p0).expect("score");
    let p1_score = manager.player_score(&id, &p1).expect("score");
    assert_eq!(*p0_score.total_score(), 8);
    assert_eq!(*p1_score.total_score(), 8);
    assert_eq!(manager.player_score(&id, &p0).expect("score"), p0_score);

    let err = manager.submit_announcement(&id, &p0, "e").unwrap_err();
    assert_eq!(err.kind(), GameErrorKind::InvalidAction);
}

#[test]
fn test_rejected_actions_do_not_persist() {
    let manager = manager_with(&[]);
    let p0 = PlayerId::new("P0");
    let id = manager.create_game(vec![p0.clone()], 3).expect("Failed to create game");
    let before = manager.game_state(&id).expect("state");

    for letter in ["", "ab", "1", "é"] {
        let err = manager.submit_announcement(&id, &p0, letter).unwrap_err();
        assert_eq!(err.kind(), GameErrorKind::InvalidInput, "letter {letter:?}");
    }
    let err = manager.submit_placement(&id, &p0, 0, 0).unwrap_err();
    assert_eq!(err.kind(), GameErrorKind::InvalidAction);
    assert_eq!(manager.game_state(&id).expect("state"), before);

    manager.submit_announcement(&id, &p0, "w").expect("announce");
    let err = manager.submit_placement(&id, &p0, 0, 9).unwrap_err();
    assert_eq!(err.kind(), GameErrorKind::InvalidInput);
    assert_eq!(manager.game_state(&id).expect("state").squares_filled(), 0);
}

#[test]
fn test_dimension_limit_from_manager() {
    let scorer = Scorer::from_dictionary(MatcherKind::Trie, Dictionary::default());
    let manager = GameManager::new(InMemoryGameStore::new(), Arc::new(scorer), 3);
    let p0 = PlayerId::new("P0");
    assert!(manager.create_game(vec![p0.clone()], 3).is_ok());
    let err = manager.create_game(vec![p0], 4).unwrap_err();
    assert_eq!(err.kind(), GameErrorKind::InvalidInput);
    assert_eq!(manager.store().ids().len(), 1);
}

#[test]
fn test_parallel_placements_on_shared_manager() {
    let manager = Arc::new(manager_with(&["go"]));
    let players: Vec<PlayerId> = (0..6).map(|i| PlayerId::new(format!("p{i}"))).collect();
    let id = manager
        .create_game(players.clone(), 2)
        .expect("Failed to create game");
    manager
        .submit_announcement(&id, &players[0], "g")
        .expect("announce");

    let handles: Vec<_> = players
        .iter()
        .cloned()
        .enumerate()
        .map(|(i, player)| {
            let manager = Arc::clone(&manager);
            let id = id.clone();
            thread::spawn(move || manager.submit_placement(&id, &player, i % 2, i / 3))
        })
        .collect();

    let outcomes: Vec<PlacementOutcome> = handles
        .into_iter()
        .map(|h| h.join().expect("thread").expect("place"))
        .collect();
    assert_eq!(
        outcomes
            .iter()
            .filter(|o| **o == PlacementOutcome::RoundComplete)
            .count(),
        1
    );
    assert_eq!(manager.game_state(&id).expect("state").squares_filled(), 1);
}
