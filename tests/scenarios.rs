use std::path::PathBuf;
use std::time::Duration;

use conway_life::{
    codec, patterns, seed, Boundary, ConfigSource, Game, LifeEngine, LifeError, LifeGrid, LifeOptions,
    StopReason,
};

fn grid_with(height: i64, width: i64, cells: &[(i64, i64)]) -> LifeGrid {
    let mut grid = LifeGrid::new(height, width).unwrap();
    for &(row, col) in cells {
        grid.set(row, col, true).unwrap();
    }
    grid
}

fn demo(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("demos").join(name)
}

#[test]
fn blinker_has_period_two() {
    let engine = LifeEngine::default();
    let start = grid_with(5, 5, &[(2, 1), (2, 2), (2, 3)]);
    let next = engine.step(&start);
    assert_eq!(next.live_cells(), vec![(1, 2), (2, 2), (3, 2)]);
    assert_eq!(engine.step(&next), start);
}

#[test]
fn block_never_changes() {
    let engine = LifeEngine::default();
    let block = grid_with(4, 4, &[(1, 1), (1, 2), (2, 1), (2, 2)]);
    let mut grid = block.clone();
    for _ in 0..20 {
        grid = engine.step(&grid);
        assert_eq!(grid, block);
    }
}

#[test]
fn exactly_three_neighbors_means_alive() {
    let engine = LifeEngine::default();
    // Center (1, 1) has exactly three live neighbors in both grids
    let dead_center = grid_with(3, 3, &[(0, 0), (0, 2), (2, 1)]);
    let live_center = grid_with(3, 3, &[(0, 0), (0, 2), (2, 1), (1, 1)]);
    assert!(engine.step(&dead_center).get(1, 1).unwrap());
    assert!(engine.step(&live_center).get(1, 1).unwrap());
}

#[test]
fn live_cell_survival_by_neighbor_count() {
    let engine = LifeEngine::default();
    let ring = [(0, 0), (0, 1), (0, 2), (1, 0), (1, 2), (2, 0), (2, 1), (2, 2)];
    for neighbors in 0..=8 {
        let mut cells = vec![(1, 1)];
        cells.extend_from_slice(&ring[..neighbors]);
        let grid = grid_with(3, 3, &cells);
        assert_eq!(grid.count_live_neighbors(1, 1, Boundary::Bounded).unwrap() as usize, neighbors);
        let survives = engine.step(&grid).get(1, 1).unwrap();
        assert_eq!(survives, neighbors == 2 || neighbors == 3, "{neighbors} neighbors");
    }
}

#[test]
fn parse_and_view() {
    let grid = codec::parse("##-\n---\n-#-", None).unwrap();
    assert_eq!((grid.height(), grid.width()), (3, 3));
    assert_eq!(grid.live_cells(), vec![(0, 0), (0, 1), (2, 1)]);

    let game = Game::from_grid(grid);
    assert_eq!(game.view(), "# # -\n- - -\n- # -");
}

#[test]
fn random_seeding_extremes() {
    assert_eq!(seed::generate(10, 10, 0.0).unwrap().population(), 0);
    assert_eq!(seed::generate(10, 10, 1.0).unwrap().population(), 100);
}

#[test]
fn invalid_dimensions_and_coordinates() {
    assert!(matches!(LifeGrid::new(0, 4), Err(LifeError::InvalidDimension { .. })));
    assert!(matches!(LifeGrid::new(4, -1), Err(LifeError::InvalidDimension { .. })));
    assert!(matches!(
        Game::new(LifeOptions::with_size(0, 3)),
        Err(LifeError::InvalidDimension { .. })
    ));

    let mut grid = LifeGrid::new(4, 4).unwrap();
    assert!(matches!(grid.get(-1, 0), Err(LifeError::OutOfBounds { .. })));
    assert!(matches!(grid.set(4, 0, true), Err(LifeError::OutOfBounds { .. })));
}

#[test]
fn demo_glider_gun_matches_builtin_pattern() {
    let options = LifeOptions {
        config: Some(ConfigSource::File(demo("glider_gun.txt"))),
        ..Default::default()
    };
    let parsed = options.build_grid().unwrap();

    let mut expected = LifeGrid::new(parsed.height() as i64, parsed.width() as i64).unwrap();
    patterns::find("gosper-glider-gun").unwrap().stamp(&mut expected, (1, 1)).unwrap();
    assert_eq!(parsed, expected);
}

#[test]
fn glider_gun_emits_gliders() {
    let gun = patterns::find("gosper-glider-gun").unwrap();
    let mut grid = LifeGrid::new(40, 60).unwrap();
    gun.stamp(&mut grid, (1, 1)).unwrap();
    let start_population = grid.population();

    // Period-30 gun: a new 5-cell glider each cycle, none reach the edge yet
    let after = LifeEngine::new(Boundary::Bounded).advance(&grid, 90);
    assert!(after.population() >= start_population + 10);
}

#[test]
fn missing_config_file_is_an_io_error() {
    let options = LifeOptions {
        config: Some(ConfigSource::File(demo("does_not_exist.txt"))),
        ..Default::default()
    };
    assert!(matches!(Game::new(options), Err(LifeError::Io(_))));
}

#[tokio::test]
async fn console_run_until_step_limit() {
    let options = LifeOptions {
        delay_ms: 0,
        max_steps: Some(2),
        config: Some(ConfigSource::from("-----\n-----\n-###-\n-----\n-----")),
        ..Default::default()
    };
    let mut game = Game::new(options).unwrap();
    let mut console = conway_life::ConsoleRenderer::new(Vec::new(), '#', '-');

    let summary = game.run_with(&mut console, std::future::pending()).await.unwrap();
    assert_eq!(summary.stop, StopReason::StepLimit);
    assert_eq!(game.generation(), 2);

    let text = String::from_utf8(console.into_inner()).unwrap();
    assert!(text.contains("Generation [0]\n- - - - -\n- - - - -\n- # # # -"));
    assert!(text.contains("Generation [1]\n- - - - -\n- - # - -\n- - # - -\n- - # - -"));
}

#[tokio::test]
async fn cancellation_stops_between_generations() {
    let engine = LifeEngine::default();
    let grid = grid_with(5, 5, &[(2, 1), (2, 2), (2, 3)]);
    let (tx, rx) = tokio::sync::oneshot::channel::<()>();

    let mut frames = 0u64;
    let mut renderer = |generation: u64, _grid: &LifeGrid| -> conway_life::Result<()> {
        frames = generation + 1;
        Ok(())
    };

    let stop = async {
        let _ = rx.await;
    };
    let runner = engine.run(grid, &mut renderer, Duration::from_millis(5), None, stop);
    let trigger = async {
        tokio::time::sleep(Duration::from_millis(60)).await;
        let _ = tx.send(());
    };

    let (summary, ()) = tokio::join!(runner, trigger);
    let summary = summary.unwrap();
    assert_eq!(summary.stop, StopReason::Cancelled);
    assert!(summary.generations >= 1);
    // The grid handed back is always a whole generation of the blinker
    assert_eq!(summary.grid.population(), 3);
    assert_eq!(frames, summary.generations + 1);
}
