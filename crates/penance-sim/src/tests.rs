use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use penance_core::commands::PlayerCommand;
use penance_core::coord::Coord;
use penance_core::enums::{
    CallChannel, EndReason, FoodKind, InventorySlot, ItemId, NpcId, PoisonKind, Role, Side,
    Species,
};
use penance_core::events::SimEvent;
use penance_terrain::{BlockGrid, TileMap};

use crate::engine::{Game, IdAlloc};
use crate::log::EventLog;
use crate::npc::{healer, runner, Brain, Npc, NpcCtx};
use crate::objects::{Food, Trap};
use crate::player::{CommandCtx, Player, PlayerTickCtx};
use crate::players::Players;

fn standard_traps(map: &TileMap) -> [Trap; 2] {
    let lm = map.landmarks();
    [
        Trap {
            side: Side::East,
            location: lm.east_trap,
            charges: 2,
        },
        Trap {
            side: Side::West,
            location: lm.west_trap,
            charges: 2,
        },
    ]
}

#[test]
fn first_reinforcements_land_one_tick_after_the_cycle_boundary() {
    let mut game = Game::new(7);
    game.start_new_wave(0, "").unwrap();

    for _ in 0..=10 {
        assert!(game.tick().unwrap());
    }
    assert_eq!(game.current_tick(), 10);
    assert!(game.snapshot().npcs.is_empty());

    assert!(game.tick().unwrap());
    // One of each species, queued on tick 10, materialized on tick 11.
    assert_eq!(game.snapshot().npcs.len(), 4);
    assert!(game.snapshot().npcs.iter().all(|npc| npc.alive));
}

#[test]
fn calls_roll_out_and_relay_to_the_partner() {
    let mut game = Game::new(3);
    game.start_new_wave(0, "").unwrap();
    for _ in 0..3 {
        game.tick().unwrap();
    }

    let snapshot = game.snapshot();
    let wave = snapshot.wave.unwrap();
    assert!(wave.correct_calls.iter().all(|call| call.is_some()));
    assert!(wave.sent_calls.iter().all(|call| call.is_none()));

    assert!(game.player_command(Role::Collector, &PlayerCommand::SendCall));
    let wave = game.snapshot().wave.unwrap();
    let attacker = CallChannel::Attacker.index();
    assert_eq!(wave.sent_calls[attacker], wave.correct_calls[attacker]);
}

#[test]
fn unattended_wave_times_out_at_the_tick_limit() {
    let mut game = Game::new(11);
    game.start_new_wave(0, "").unwrap();

    let mut ticks = 0;
    while game.tick().unwrap() {
        ticks += 1;
        assert!(ticks < 400, "wave never timed out");
    }
    assert_eq!(game.current_tick(), 300);
    assert!(game
        .events()
        .iter()
        .any(|event| matches!(event, SimEvent::WaveEnded { reason: EndReason::Timeout })));
}

#[test]
fn escaping_runner_returns_to_the_reserve_pool() {
    let map = TileMap::standard();
    let block = BlockGrid::new();
    let mut rng = ChaCha8Rng::seed_from_u64(0);
    let mut log = EventLog::new();

    let mut npc = Npc::new(NpcId(0), Species::Runner, 0, map.landmarks().raa_tile);
    npc.cycle = 1;
    let mut ctx = NpcCtx {
        map: &map,
        block: &block,
        rng: &mut rng,
        rel_tick: 60,
        wave_number: 0,
        log: &mut log,
    };
    let mut food = Vec::new();
    let mut traps = standard_traps(&map);
    let mut reserves = 0;
    runner::do_cycle(&mut npc, &mut ctx, &mut food, &mut traps, &mut reserves);

    assert!(!npc.alive);
    assert_eq!(reserves, 1);
    match &npc.brain {
        Brain::Runner(brain) => assert!(brain.has_escaped),
        other => panic!("unexpected brain: {other:?}"),
    }
    assert!(log
        .events()
        .iter()
        .any(|event| matches!(event, SimEvent::RunnerEscaped)));
}

#[test]
fn runner_sniffs_commits_and_eats_correct_bait() {
    let map = TileMap::standard();
    let block = BlockGrid::new();
    let mut rng = ChaCha8Rng::seed_from_u64(0);
    let mut log = EventLog::new();
    let mut traps = standard_traps(&map);
    let bait = Coord::new(20, 22);
    let mut food = vec![Food {
        id: ItemId(7),
        location: bait,
        kind: FoodKind::Tofu,
        is_correct: true,
    }];

    let mut npc = Npc::new(NpcId(0), Species::Runner, 0, Coord::new(20, 20));
    npc.cycle = 2;
    if let Brain::Runner(brain) = &mut npc.brain {
        brain.target_state = 2;
    }
    let mut reserves = 0;
    let mut ctx = NpcCtx {
        map: &map,
        block: &block,
        rng: &mut rng,
        rel_tick: 32,
        wave_number: 0,
        log: &mut log,
    };
    runner::do_cycle(&mut npc, &mut ctx, &mut food, &mut traps, &mut reserves);

    match &npc.brain {
        Brain::Runner(brain) => {
            assert_eq!(brain.followee, Some(ItemId(7)));
            assert_eq!(brain.target_state, 0);
        }
        other => panic!("unexpected brain: {other:?}"),
    }
    assert_eq!(npc.destination, bait);

    // Eating happens once the runner stands on the bait.
    npc.location = bait;
    npc.cycle = 3;
    let mut ctx = NpcCtx {
        map: &map,
        block: &block,
        rng: &mut rng,
        rel_tick: 33,
        wave_number: 0,
        log: &mut log,
    };
    runner::do_cycle(&mut npc, &mut ctx, &mut food, &mut traps, &mut reserves);

    assert!(food.is_empty());
    assert!(npc.alive);
    assert!(log
        .events()
        .iter()
        .any(|event| matches!(event, SimEvent::RunnerAte { correct: true })));
}

#[test]
fn wrong_bait_confuses_the_runner() {
    let map = TileMap::standard();
    let block = BlockGrid::new();
    let mut rng = ChaCha8Rng::seed_from_u64(0);
    let mut log = EventLog::new();
    let mut traps = standard_traps(&map);
    let here = Coord::new(20, 20);
    let mut food = vec![Food {
        id: ItemId(9),
        location: here,
        kind: FoodKind::Worms,
        is_correct: false,
    }];

    let mut npc = Npc::new(NpcId(0), Species::Runner, 0, here);
    npc.cycle = 7;
    if let Brain::Runner(brain) = &mut npc.brain {
        brain.followee = Some(ItemId(9));
        brain.target_state = 0;
    }
    let mut reserves = 0;
    let mut ctx = NpcCtx {
        map: &map,
        block: &block,
        rng: &mut rng,
        rel_tick: 47,
        wave_number: 0,
        log: &mut log,
    };
    runner::do_cycle(&mut npc, &mut ctx, &mut food, &mut traps, &mut reserves);

    assert!(food.is_empty());
    // The late cycle positions rewind and the runner retreats north.
    assert_eq!(npc.cycle, 2);
    assert_eq!(
        npc.destination,
        Coord::new(here.x, map.landmarks().blugh_row)
    );
    match &npc.brain {
        Brain::Runner(brain) => {
            assert_eq!(brain.blugh_i, 3);
            assert_eq!(brain.followee, None);
        }
        other => panic!("unexpected brain: {other:?}"),
    }
    assert!(log
        .events()
        .iter()
        .any(|event| matches!(event, SimEvent::RunnerAte { correct: false })));
}

#[test]
fn fresh_healer_shows_a_zero_hitsplat_then_stops_ticking_poison() {
    let map = TileMap::standard();
    let mut block = BlockGrid::new();
    let players = Players::new(&map, &mut block);
    let mut rng = ChaCha8Rng::seed_from_u64(5);
    let mut log = EventLog::new();

    let spawn = map.landmarks().penance_healer_spawn;
    let mut npc = Npc::new(NpcId(1), Species::Healer, 0, spawn);
    let starting_hp = npc.hitpoints;

    let mut runners = Vec::new();
    let mut ctx = NpcCtx {
        map: &map,
        block: &block,
        rng: &mut rng,
        rel_tick: 15,
        wave_number: 0,
        log: &mut log,
    };
    healer::do_cycle(&mut npc, &mut ctx, &players, &mut runners);

    assert_eq!(npc.hitpoints, starting_hp);
    match &npc.brain {
        Brain::Healer(brain) => assert!(!brain.is_poisoned()),
        other => panic!("unexpected brain: {other:?}"),
    }
}

#[test]
fn applied_poison_hits_on_a_five_tick_beat() {
    let map = TileMap::standard();
    let mut block = BlockGrid::new();
    let players = Players::new(&map, &mut block);
    let mut rng = ChaCha8Rng::seed_from_u64(5);
    let mut log = EventLog::new();

    let spawn = map.landmarks().penance_healer_spawn;
    let mut npc = Npc::new(NpcId(1), Species::Healer, 0, spawn);
    let starting_hp = npc.hitpoints;

    healer::apply_poison(&mut npc, 13);
    assert_eq!(npc.hitpoints, starting_hp - 4);

    let mut runners = Vec::new();
    for rel_tick in 14..=18 {
        let mut ctx = NpcCtx {
            map: &map,
            block: &block,
            rng: &mut rng,
            rel_tick,
            wave_number: 0,
            log: &mut log,
        };
        healer::do_cycle(&mut npc, &mut ctx, &players, &mut runners);
    }
    // Exactly one poison tick in that window, at relative tick 18.
    assert_eq!(npc.hitpoints, starting_hp - 8);
}

#[test]
fn defender_drops_bait_matching_the_current_call() {
    let map = TileMap::standard();
    let mut ids = IdAlloc::default();
    let mut log = EventLog::new();
    let mut calls = [None; 4];
    let mut correct_calls = [None; 4];
    correct_calls[CallChannel::Defender.index()] = Some(0); // tofu

    let mut player = Player::new(Role::Defender, Coord::new(20, 20));
    player.inventory[1] = InventorySlot::Food {
        food: FoodKind::Tofu,
    };
    player.inventory[2] = InventorySlot::Food {
        food: FoodKind::Tofu,
    };
    player.inventory[3] = InventorySlot::Food {
        food: FoodKind::Tofu,
    };

    let mut dropped_food = Vec::new();
    let traps = standard_traps(&map);
    let healers = Vec::new();
    let mut ctx = CommandCtx {
        map: &map,
        calls: &mut calls,
        correct_calls: &correct_calls,
        dropped_food: &mut dropped_food,
        dropped_eggs: &[],
        dropped_hnls: &[],
        traps: &traps,
        healers: &healers,
        ids: &mut ids,
        log: &mut log,
    };
    assert!(player.handle_command(
        &PlayerCommand::DropFood {
            kind: FoodKind::Tofu,
            count: 3,
        },
        &mut ctx,
    ));

    assert_eq!(dropped_food.len(), 3);
    assert!(dropped_food.iter().all(|food| food.is_correct));
    assert!(player.inventory[1..=3]
        .iter()
        .all(|slot| slot.is_empty()));
}

#[test]
fn trap_repair_takes_five_busy_ticks_and_a_log() {
    let map = TileMap::standard();
    let mut block = BlockGrid::new();
    let mut ids = IdAlloc::default();
    let mut log = EventLog::new();
    let mut calls = [None; 4];
    let correct_calls = [None; 4];
    let mut traps = standard_traps(&map);
    traps[0].charges = 0;

    let beside = map.landmarks().east_trap + penance_core::coord::NORTH;
    let mut player = Player::new(Role::Defender, beside);
    player.inventory[1] = InventorySlot::Hammer;
    player.inventory[2] = InventorySlot::Logs;

    let mut dropped_food = Vec::new();
    {
        let healers = Vec::new();
        let mut ctx = CommandCtx {
            map: &map,
            calls: &mut calls,
            correct_calls: &correct_calls,
            dropped_food: &mut dropped_food,
            dropped_eggs: &[],
            dropped_hnls: &[],
            traps: &traps,
            healers: &healers,
            ids: &mut ids,
            log: &mut log,
        };
        assert!(player.handle_command(&PlayerCommand::RepairTrap { which: Side::East }, &mut ctx));
    }

    let mut dropped_eggs = Vec::new();
    let mut dropped_hnls = Vec::new();
    let mut hnl_flags = 0;
    let mut healers = Vec::new();
    for tick in 0..6 {
        let mut ctx = PlayerTickCtx {
            map: &map,
            block: &mut block,
            rel_tick: tick,
            dropped_food: &mut dropped_food,
            dropped_eggs: &mut dropped_eggs,
            dropped_hnls: &mut dropped_hnls,
            hnl_flags: &mut hnl_flags,
            traps: &mut traps,
            healers: &mut healers,
            correct_calls: &correct_calls,
            log: &mut log,
        };
        player.tick(&mut ctx);
    }

    assert_eq!(traps[0].charges, 2);
    assert_eq!(player.busy_ticks, 0);
    assert!(!player.inventory.contains(&InventorySlot::Logs));
    assert!(player.inventory.contains(&InventorySlot::Hammer));
    assert!(log
        .events()
        .iter()
        .any(|event| matches!(event, SimEvent::TrapRepaired { side: Side::East })));
}

#[test]
fn defender_dispenser_restocks_bait_in_rotation() {
    let map = TileMap::standard();
    let mut block = BlockGrid::new();
    let mut ids = IdAlloc::default();
    let mut log = EventLog::new();
    let mut calls = [None; 4];
    let correct_calls = [None; 4];
    let traps = standard_traps(&map);

    let spot = map.landmarks().dispenser(Role::Defender) + penance_core::coord::NORTH;
    let mut player = Player::new(Role::Defender, spot);

    let mut dropped_food = Vec::new();
    {
        let healers = Vec::new();
        let mut ctx = CommandCtx {
            map: &map,
            calls: &mut calls,
            correct_calls: &correct_calls,
            dropped_food: &mut dropped_food,
            dropped_eggs: &[],
            dropped_hnls: &[],
            traps: &traps,
            healers: &healers,
            ids: &mut ids,
            log: &mut log,
        };
        assert!(player.handle_command(&PlayerCommand::UseDispenser { option: None }, &mut ctx));
    }

    let mut dropped_eggs = Vec::new();
    let mut dropped_hnls = Vec::new();
    let mut hnl_flags = 0;
    let mut healers = Vec::new();
    let mut traps = traps;
    let mut ctx = PlayerTickCtx {
        map: &map,
        block: &mut block,
        rel_tick: 0,
        dropped_food: &mut dropped_food,
        dropped_eggs: &mut dropped_eggs,
        dropped_hnls: &mut dropped_hnls,
        hnl_flags: &mut hnl_flags,
        traps: &mut traps,
        healers: &mut healers,
        correct_calls: &correct_calls,
        log: &mut log,
    };
    player.tick(&mut ctx);

    assert_eq!(
        player.inventory[1],
        InventorySlot::Food {
            food: FoodKind::Crackers
        }
    );
    assert_eq!(
        player.inventory[2],
        InventorySlot::Food {
            food: FoodKind::Tofu
        }
    );
    assert_eq!(
        player.inventory[3],
        InventorySlot::Food {
            food: FoodKind::Worms
        }
    );
    assert!(player.busy_ticks > 0);
}

#[test]
fn healer_dispenser_overstock_fills_five_of_one_kind() {
    let map = TileMap::standard();
    let mut block = BlockGrid::new();
    let mut ids = IdAlloc::default();
    let mut log = EventLog::new();
    let mut calls = [None; 4];
    let correct_calls = [None; 4];
    let traps = standard_traps(&map);

    let spot = map.landmarks().dispenser(Role::Healer) + penance_core::coord::NORTH;
    let mut player = Player::new(Role::Healer, spot);

    let mut dropped_food = Vec::new();
    {
        let healers = Vec::new();
        let mut ctx = CommandCtx {
            map: &map,
            calls: &mut calls,
            correct_calls: &correct_calls,
            dropped_food: &mut dropped_food,
            dropped_eggs: &[],
            dropped_hnls: &[],
            traps: &traps,
            healers: &healers,
            ids: &mut ids,
            log: &mut log,
        };
        assert!(player.handle_command(&PlayerCommand::UseDispenser { option: Some(0) }, &mut ctx));
    }

    let mut dropped_eggs = Vec::new();
    let mut dropped_hnls = Vec::new();
    let mut hnl_flags = 0;
    let mut healers = Vec::new();
    let mut traps = traps;
    let mut ctx = PlayerTickCtx {
        map: &map,
        block: &mut block,
        rel_tick: 0,
        dropped_food: &mut dropped_food,
        dropped_eggs: &mut dropped_eggs,
        dropped_hnls: &mut dropped_hnls,
        hnl_flags: &mut hnl_flags,
        traps: &mut traps,
        healers: &mut healers,
        correct_calls: &correct_calls,
        log: &mut log,
    };
    player.tick(&mut ctx);

    let tofu = player
        .inventory
        .iter()
        .filter(|slot| {
            matches!(
                slot,
                InventorySlot::Poison {
                    poison: PoisonKind::Tofu
                }
            )
        })
        .count();
    assert_eq!(tofu, 5);
    assert!(player.inventory.contains(&InventorySlot::Vial));
}

#[test]
fn extinction_is_reported_once_per_species() {
    let mut game = Game::new(2);
    game.start_new_wave(0, "").unwrap();

    for _ in 0..150 {
        if let Some(wave) = game.wave_mut() {
            for fighter in wave.penance.fighters.iter_mut() {
                fighter.hitpoints = 0;
            }
        }
        if !game.tick().unwrap() {
            break;
        }
    }

    let extinctions = game
        .events()
        .iter()
        .filter(|event| {
            matches!(
                event,
                SimEvent::SpeciesExtinct {
                    species: Species::Fighter
                }
            )
        })
        .count();
    assert_eq!(extinctions, 1);
}

#[test]
fn same_seed_and_commands_give_identical_snapshots() {
    let run = || {
        let mut game = Game::new(42);
        game.start_new_wave(3, "ss-es").unwrap();
        for tick in 0..80 {
            if tick == 5 {
                game.player_command(
                    Role::Defender,
                    &PlayerCommand::Move {
                        destination: Coord::new(25, 20),
                    },
                );
            }
            if tick == 9 {
                game.player_command(Role::Collector, &PlayerCommand::SendCall);
            }
            game.tick().unwrap();
        }
        serde_json::to_string(&game.snapshot()).unwrap()
    };

    assert_eq!(run(), run());
}

#[test]
fn bad_runner_script_is_rejected() {
    let mut game = Game::new(0);
    assert!(matches!(
        game.start_new_wave(0, "sx"),
        Err(penance_core::error::GameError::InvalidMovementScript(_))
    ));
    assert!(matches!(
        game.start_new_wave(9, ""),
        Err(penance_core::error::GameError::InvalidWaveIndex(9))
    ));
    assert!(matches!(game.tick(), Err(penance_core::error::GameError::WaveNotStarted)));
}
