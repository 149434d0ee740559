use pokemon_battle_engine::{
    generate_wild, load_party, load_spawn_tables, BattleConfig, BattlePhase, BattleResult,
    BattleState, Behavior, Catalog, ScoringAI, Side, TurnRng,
};
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

const PARTY_FILE: &str = "party.ron";
const CONFIG_FILE: &str = "battle.ron";
const MAX_ROUNDS: u32 = 200;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let data_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("data"));

    if let Err(err) = run(&data_path) {
        error!(%err, "battle demo failed");
        std::process::exit(1);
    }
}

fn run(data_path: &Path) -> BattleResult<()> {
    let catalog = Catalog::load(data_path)?;
    let config = BattleConfig::load(&data_path.join(CONFIG_FILE))?;
    let tables = load_spawn_tables(data_path, &catalog)?;
    let mut party = load_party(&data_path.join(PARTY_FILE))?;

    let Some(table) = tables.first() else {
        warn!("no spawn tables to draw an opponent from");
        return Ok(());
    };

    let mut encounter_rng = TurnRng::from_optional_seed(config.seed);
    let wild = generate_wild(table, &catalog, &mut encounter_rng)?;
    info!(
        location = %table.location,
        species = %wild.species(),
        level = wild.level(),
        "a wild combatant appeared"
    );

    let mut battle = BattleState::from_party(&party, vec![wild], &catalog, config)?;
    drive(&mut battle);

    battle.write_back(&mut party);
    match serde_json::to_string_pretty(&party) {
        Ok(json) => println!("{}", json),
        Err(err) => error!(%err, "could not serialize the party"),
    }
    Ok(())
}

/// Run the battle to the end with the scoring policy choosing for both sides.
fn drive(battle: &mut BattleState) {
    let ai = ScoringAI::new();

    while !battle.is_finished() && battle.round() < MAX_ROUNDS {
        let acting: Vec<Side> = match battle.phase() {
            BattlePhase::AwaitingSwitch(side) => vec![side],
            _ => Side::ALL.to_vec(),
        };

        for side in acting {
            let Some(action) = ai.decide_action(side, battle) else {
                warn!(?side, "no legal action left; abandoning the battle");
                return;
            };
            if let Err(err) = battle.submit_action(side, action) {
                error!(?side, %err, "policy chose an illegal action");
                return;
            }
        }
        if let Err(err) = battle.order_actions() {
            error!(%err, "could not order the round");
            return;
        }

        while battle.phase() == BattlePhase::Executing {
            match battle.execute_next() {
                Ok(_) => narrate(battle),
                Err(err) => {
                    error!(%err, "execution stopped");
                    return;
                }
            }
        }
    }

    if let Some(outcome) = battle.outcome() {
        info!(?outcome, rounds = battle.round(), "battle over");
    }
}

fn narrate(battle: &mut BattleState) {
    for line in battle.take_narration() {
        info!("{}", line);
    }
}
