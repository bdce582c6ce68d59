use pokemon_battle_field::{
    BattleStat, GameConfig, GameManager, Locale, Move, PhaseKind, Species, Translator,
};
use std::error::Error;
use std::process::ExitCode;

const USAGE: &str = "Usage: pokemon-battle-field [--locale <en|fr|pt_BR>] [--config <file.ron>] [--seed <n>] [--json]";

// The demo: raise, lower, then wipe both stat stages
const DEMO_MOVES: [Move; 3] = [Move::SwordsDance, Move::Charm, Move::Haze];

#[derive(Debug, Default)]
struct CliArgs {
    locale: Option<Locale>,
    config: Option<String>,
    seed: Option<u64>,
    json: bool,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<CliArgs, String> {
    let mut parsed = CliArgs::default();
    while let Some(arg) = args.next() {
        let mut value = |flag: &str| {
            args.next()
                .ok_or_else(|| format!("{} needs a value\n{}", flag, USAGE))
        };
        match arg.as_str() {
            "--locale" => {
                let code = value("--locale")?;
                parsed.locale = Some(code.parse().map_err(|err: pokemon_battle_field::LocaleError| err.to_string())?);
            }
            "--config" => parsed.config = Some(value("--config")?),
            "--seed" => {
                let seed = value("--seed")?;
                parsed.seed = Some(
                    seed.parse()
                        .map_err(|_| format!("--seed expects a number, got {}", seed))?,
                );
            }
            "--json" => parsed.json = true,
            "-h" | "--help" => return Err(USAGE.to_string()),
            other => return Err(format!("Unknown argument: {}\n{}", other, USAGE)),
        }
    }
    Ok(parsed)
}

fn resolve_config(args: &CliArgs) -> Result<GameConfig, Box<dyn Error>> {
    let mut config = match &args.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };

    if let Ok(code) = std::env::var("BATTLE_LOCALE") {
        config.locale = code.parse()?;
    }
    if let Some(locale) = args.locale {
        config.locale = locale;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }

    // Fill whatever the config leaves open with the Rattata mirror match
    let overrides = &mut config.overrides;
    overrides.starting_level.get_or_insert(100);
    overrides.moveset.get_or_insert_with(|| DEMO_MOVES.to_vec());
    overrides.ability.get_or_insert(Default::default());
    overrides.enemy_species.get_or_insert(Species::Rattata);
    overrides.enemy_level.get_or_insert(100);
    overrides.enemy_moveset.get_or_insert_with(|| vec![Move::Splash]);
    overrides.enemy_ability.get_or_insert(Default::default());
    Ok(config)
}

fn run(args: CliArgs) -> Result<(), Box<dyn Error>> {
    let config = resolve_config(&args)?;
    let translator = Translator::new(config.locale)?;
    log::info!("running Haze demo in {}", config.locale);

    let mut game = GameManager::from_config(&config);
    game.start_battle(&[Species::Rattata])?;

    for move_ in DEMO_MOVES {
        let position = game
            .move_position(move_)
            .ok_or_else(|| format!("The player's Pokemon does not know {}", move_))?;
        game.do_attack(position)?;
        game.phase_interceptor().to(PhaseKind::TurnEnd)?;

        let state = game.state()?;
        for battler in state.field.battlers() {
            log::info!(
                "after {}: {} ATK stage {}",
                move_,
                battler,
                state.stat_stage(battler, BattleStat::Atk)
            );
        }
    }

    let engine = game.engine()?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(engine.events().events())?);
    } else {
        for line in engine.events().formatted(engine.state(), &translator)? {
            println!("{}", line);
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = match parse_args(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(message) => {
            eprintln!("{}", message);
            return ExitCode::from(2);
        }
    };

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::FAILURE
        }
    }
}
