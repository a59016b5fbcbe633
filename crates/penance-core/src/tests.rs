use crate::commands::PlayerCommand;
use crate::constants::RUNNER_ZONE_CLAMP;
use crate::coord::{Coord, EAST, NORTH, SOUTH, UNDER, WEST};
use crate::enums::{CallChannel, FoodKind, Role};

#[test]
fn distances() {
    let a = Coord::new(3, 7);
    let b = Coord::new(-1, 9);
    assert_eq!(a.chebyshev_to(b), 4);
    assert_eq!(a.taxicab_to(b), 6);
    assert_eq!(a.chebyshev_to(a), 0);
}

#[test]
fn single_steps() {
    assert_eq!(Coord::new(5, -2).single_step(), Coord::new(1, -1));
    assert_eq!(Coord::new(0, 4).single_step(), SOUTH);
    assert_eq!(Coord::new(-3, 0).single_step(), WEST);
    assert_eq!(UNDER.single_step(), UNDER);
}

#[test]
fn taxicab_step_prefers_y_on_ties() {
    assert_eq!(Coord::new(2, 2).single_step_taxicab(), SOUTH);
    assert_eq!(Coord::new(-3, -3).single_step_taxicab(), NORTH);
    assert_eq!(Coord::new(4, 1).single_step_taxicab(), EAST);
    assert_eq!(Coord::new(1, -4).single_step_taxicab(), NORTH);
}

#[test]
fn southwest_ordering_holds_on_equality() {
    let a = Coord::new(10, 20);
    assert!(a.is_southwest_of(a));
    assert!(Coord::new(9, 21).is_southwest_of(a));
    assert!(!Coord::new(11, 20).is_southwest_of(a));
    assert!(!Coord::new(10, 19).is_southwest_of(a));
}

#[test]
fn runner_zones_partition_the_lane() {
    // Tiles inside one 8x8 zone map to the same zone coordinate.
    let edge = crate::constants::RUNNER_ZONE_EDGE;
    assert_eq!(edge.runner_zone(), UNDER);
    assert_eq!((edge + Coord::new(7, 7)).runner_zone(), UNDER);
    assert_eq!((edge + Coord::new(8, 0)).runner_zone(), EAST);
    assert_eq!((edge + Coord::new(-1, 0)).runner_zone(), WEST);
    // Zone coordinates stay inside the clamp window for on-map tiles.
    let zone = Coord::new(36, 30).runner_zone();
    assert_eq!(zone.clamp(UNDER, RUNNER_ZONE_CLAMP), zone);
}

#[test]
fn call_channels_pair_up() {
    for role in Role::ALL {
        // What a role calls for is never its own channel.
        assert_ne!(role.channel(), role.calls_for());
    }
    assert_eq!(Role::MainAttacker.calls_for(), CallChannel::Collector);
    assert_eq!(Role::SecondAttacker.calls_for(), CallChannel::Collector);
    assert_eq!(Role::Collector.calls_for(), CallChannel::Attacker);
    assert_eq!(Role::Healer.calls_for(), CallChannel::Defender);
    assert_eq!(Role::Defender.calls_for(), CallChannel::Healer);
}

#[test]
fn attacker_channel_has_four_calls() {
    assert_eq!(CallChannel::Attacker.call_count(), 4);
    assert_eq!(CallChannel::Defender.call_count(), 3);
}

#[test]
fn commands_round_trip_through_json() {
    let commands = [
        PlayerCommand::Move {
            destination: Coord::new(20, 22),
        },
        PlayerCommand::SendCall,
        PlayerCommand::DropFood {
            kind: FoodKind::Tofu,
            count: 3,
        },
        PlayerCommand::UseDispenser { option: Some(1) },
    ];
    for command in commands {
        let wire = serde_json::to_string(&command).unwrap();
        let back: PlayerCommand = serde_json::from_str(&wire).unwrap();
        assert_eq!(back, command);
    }
    assert_eq!(
        serde_json::to_string(&PlayerCommand::SendCall).unwrap(),
        r#"{"type":"send_call"}"#
    );
}
