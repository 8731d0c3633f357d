use beverage_bandits::{
    Battle, BattleConfig, Cell, Error, Faction, Outcome, Position, RoundReport, Scenario,
};

const SAMPLES: [&str; 6] = [
    "#######\n#.G...#\n#...EG#\n#.#.#G#\n#..G#E#\n#.....#\n#######",
    "#######\n#G..#E#\n#E#E.E#\n#G.##.#\n#...#E#\n#...E.#\n#######",
    "#######\n#E..EG#\n#.#G.E#\n#E.##E#\n#G..#.#\n#..E#.#\n#######",
    "#######\n#E.G#.#\n#.#G..#\n#G.#.G#\n#G..#.#\n#...E.#\n#######",
    "#######\n#.E...#\n#.#..G#\n#.###.#\n#E#G#G#\n#...#G#\n#######",
    "#########\n#G......#\n#.E.#...#\n#..##..G#\n#...##..#\n#...#...#\n#.G...G.#\n#.....G.#\n#########",
];

const CORRIDOR: &str = "#####\n#G..#\n###.#\n#E..#\n#####";

fn battle_with(map: &str, config: BattleConfig) -> Battle {
    let scenario = map.parse::<Scenario>().unwrap();
    Battle::new(&scenario, &config).unwrap()
}

fn battle(map: &str, elf_attack: i32) -> Battle {
    battle_with(
        map,
        BattleConfig {
            elf_attack,
            ..BattleConfig::default()
        },
    )
}

fn outcome(winner: Faction, rounds: u32, remaining_hit_points: i32, losses: usize) -> Outcome {
    Outcome {
        winner,
        rounds,
        remaining_hit_points,
        losses,
    }
}

#[test]
fn sample_battles_end_with_known_outcomes() {
    let expected = [
        (outcome(Faction::Goblin, 47, 590, 0), 27730),
        (outcome(Faction::Elf, 37, 982, 1), 36334),
        (outcome(Faction::Elf, 46, 859, 1), 39514),
        (outcome(Faction::Goblin, 35, 793, 0), 27755),
        (outcome(Faction::Goblin, 54, 536, 0), 28944),
        (outcome(Faction::Goblin, 20, 937, 0), 18740),
    ];

    for (map, (expected_outcome, expected_score)) in SAMPLES.iter().zip(expected) {
        let result = battle(map, 3).run().unwrap();
        assert_eq!(result, expected_outcome, "map:\n{}", map);
        assert_eq!(result.score(), expected_score);
    }
}

#[test]
fn units_close_in_following_reading_order() {
    let mut battle = battle(
        "#########\n#G..G..G#\n#.......#\n#.......#\n#G..E..G#\n#.......#\n#.......#\n#G..G..G#\n#########",
        3,
    );
    let expected = [
        "#########\n#.G...G.#\n#...G...#\n#...E..G#\n#.G.....#\n#.......#\n#G..G..G#\n#.......#\n#########",
        "#########\n#..G.G..#\n#...G...#\n#.G.E.G.#\n#.......#\n#G..G..G#\n#.......#\n#.......#\n#########",
        "#########\n#.......#\n#..GGG..#\n#..GEG..#\n#G..G...#\n#......G#\n#.......#\n#.......#\n#########",
    ];

    for map in expected {
        assert!(matches!(
            battle.run_round().unwrap(),
            RoundReport::Completed { .. }
        ));
        assert_eq!(battle.to_string(), map);
    }
    assert_eq!(battle.rounds(), 3);
}

#[test]
fn corridor_goes_to_the_unit_striking_first() {
    // The goblin moves first and reaches the elf one turn earlier, so it lands
    // 67 hits while taking 66.
    let result = battle(CORRIDOR, 3).run().unwrap();
    assert_eq!(result, outcome(Faction::Goblin, 69, 2, 0));
    assert_eq!(result.score(), 138);

    let mirrored = battle("#####\n#E..#\n###.#\n#G..#\n#####", 3).run().unwrap();
    assert_eq!(mirrored, outcome(Faction::Elf, 69, 2, 0));
}

#[test]
fn abandoned_round_is_not_counted() {
    let mut battle = battle("#####\n#EGE#\n#####", 200);
    assert_eq!(battle.run_round().unwrap(), RoundReport::Abandoned);
    assert_eq!(battle.rounds(), 0);
    assert!(battle.is_over());

    let result = Outcome::from_battle(&battle).unwrap();
    assert_eq!(result, outcome(Faction::Elf, 0, 400, 0));
    assert_eq!(result.score(), 0);
}

#[test]
fn round_ending_with_last_unit_kill_is_counted() {
    let result = battle("####\n#GE#\n####", 200).run().unwrap();
    assert_eq!(result, outcome(Faction::Elf, 1, 197, 0));
    assert_eq!(result.score(), 197);
}

#[test]
fn one_faction_map_is_won_at_round_zero() {
    let mut battle = battle("#####\n#G..#\n#.G.#\n#####", 3);
    assert!(battle.is_over());
    assert_eq!(battle.winner(), Some(Faction::Goblin));

    let result = battle.run().unwrap();
    assert_eq!(result, outcome(Faction::Goblin, 0, 400, 0));
    assert_eq!(result.score(), 0);
}

#[test]
fn map_without_units_is_rejected() {
    let scenario = "#####\n#...#\n#####".parse::<Scenario>().unwrap();
    let result = Battle::new(&scenario, &BattleConfig::default());
    assert!(matches!(result, Err(Error::NoUnits)));
}

#[test]
fn walled_off_units_stop_as_stalemate() {
    let result = battle("#####\n#G#E#\n#####", 3).run();
    assert!(matches!(
        result,
        Err(Error::NoWinnerWithinBound { rounds: 1 })
    ));
}

#[test]
fn round_cap_stops_long_battles() {
    let mut battle = battle_with(
        CORRIDOR,
        BattleConfig {
            max_rounds: 10,
            ..BattleConfig::default()
        },
    );
    assert!(matches!(
        battle.run(),
        Err(Error::NoWinnerWithinBound { rounds: 10 })
    ));
    assert_eq!(battle.rounds(), 10);
}

#[test]
fn every_sample_ends_with_one_faction_standing() {
    for map in SAMPLES {
        for elf_attack in [3, 10, 25] {
            let mut battle = battle(map, elf_attack);
            battle.run().unwrap();

            let winner = battle.winner().unwrap();
            assert!(battle.living_units(winner).next().is_some());
            assert_eq!(battle.living_units(winner.enemy()).count(), 0);
            for dead in battle.units().iter().filter(|u| !u.is_alive()) {
                assert_ne!(
                    battle.grid().cell(&dead.position()),
                    Some(Cell::Unit(dead.id()))
                );
            }
        }
    }
}

#[test]
fn replaying_a_battle_gives_the_same_result() {
    for map in SAMPLES {
        let mut first = battle(map, 12);
        let mut second = battle(map, 12);
        assert_eq!(first.run().unwrap(), second.run().unwrap());
        assert_eq!(first.to_string(), second.to_string());
    }
}

#[test]
fn dead_units_leave_open_cells() {
    let mut battle = battle("####\n#GE#\n####", 200);
    battle.run().unwrap();
    assert_eq!(battle.to_string(), "####\n#.E#\n####");
    assert!(battle.grid().is_open(&Position::new(1, 1)));
}

#[test]
fn map_parsing_reports_bad_input() {
    assert!(matches!(
        "#####\n#G.X#\n#####".parse::<Scenario>(),
        Err(Error::InvalidMapCharacter {
            c: 'X',
            position: Position { r: 1, c: 3 }
        })
    ));
    assert!(matches!(
        "#####\n#G.#\n#####".parse::<Scenario>(),
        Err(Error::InconsistentRow {
            expected: 5,
            given: 4
        })
    ));
    assert!(matches!("\n\n".parse::<Scenario>(), Err(Error::EmptyMap)));
}

#[test]
fn map_rows_must_be_contiguous() {
    assert!(matches!(
        "#####\n#G.E#\n\n#####".parse::<Scenario>(),
        Err(Error::RowAfterBlankLine { row: 2 })
    ));

    let scenario = "\n#####\n#G.E#\n#####\n\n".parse::<Scenario>().unwrap();
    assert_eq!(scenario.grid().row_n(), 3);
    assert_eq!(scenario.spawns().len(), 2);
}

#[test]
fn units_are_only_placed_on_open_cells() {
    let scenario = "#####\n#G.E#\n#####".parse::<Scenario>().unwrap();
    let mut grid = scenario.grid().clone();

    let wall = Position::new(0, 0);
    assert!(matches!(
        grid.place_unit(0, &wall),
        Err(Error::InvalidMoveTarget { position }) if position == wall
    ));
    assert_eq!(grid.cell(&wall), Some(Cell::Wall));

    let open = Position::new(1, 2);
    grid.place_unit(0, &open).unwrap();
    assert!(matches!(
        grid.place_unit(1, &open),
        Err(Error::InvalidMoveTarget { position }) if position == open
    ));
    assert_eq!(grid.cell(&open), Some(Cell::Unit(0)));

    let outside = Position::new(5, 5);
    assert!(matches!(
        grid.place_unit(1, &outside),
        Err(Error::InvalidMoveTarget { .. })
    ));
}

#[test]
fn non_positive_attack_power_is_rejected() {
    let scenario = SAMPLES[0].parse::<Scenario>().unwrap();
    for (elf_attack, goblin_attack, bad) in [(0, 3, 0), (i32::MIN, 3, i32::MIN), (3, -1, -1)] {
        let config = BattleConfig {
            elf_attack,
            goblin_attack,
            ..BattleConfig::default()
        };
        assert!(matches!(
            Battle::new(&scenario, &config),
            Err(Error::InvalidAttackPower { attack }) if attack == bad
        ));
    }
}

#[test]
fn huge_attack_power_kills_in_one_hit() {
    let mut battle = battle(CORRIDOR, i32::MAX);
    let result = battle.run().unwrap();
    assert_eq!(result.winner, Faction::Elf);
    assert_eq!(battle.units()[0].faction(), Faction::Goblin);
    assert_eq!(battle.units()[0].hit_points(), 200 - i32::MAX);
}

#[test]
fn scenario_renders_back_to_its_map() {
    for map in SAMPLES {
        let scenario = map.parse::<Scenario>().unwrap();
        assert_eq!(scenario.to_string(), map);
    }

    let scenario = SAMPLES[0].parse::<Scenario>().unwrap();
    assert_eq!(scenario.unit_count(Faction::Goblin), 4);
    assert_eq!(scenario.unit_count(Faction::Elf), 2);
    assert_eq!(scenario.spawns()[0].position, Position::new(1, 2));
}
