//! Command-line entry point for the creature catalog
//!
//! Loads the catalog from PokeAPI, applies the criteria given as flags and
//! prints the visible list, optionally with selections and an evolution tree.

use clap::Parser;
use serde_json::json;

use catalog::{CatalogConfig, CatalogError, CatalogResult, CatalogSession, PokeApiSource};
use shared::{
    component_debug, component_info, component_warn,
    logging::{self, ComponentId},
    Creature, Criteria, EvolutionSnapshot, EvolutionState, Generation, MinStats, PokemonType, SelectionKind,
    SelectionSnapshot, SortKey,
};

/// Browse, filter and compare creatures from the PokeAPI catalog
#[derive(Parser)]
#[command(name = "pokedex")]
#[command(about = "Filter, sort and compare creatures from the PokeAPI catalog")]
pub struct Args {
    /// Case-insensitive name fragment or id digits
    #[arg(long, default_value = "")]
    pub search: String,

    /// Type filter (repeatable, any match)
    #[arg(long = "type")]
    pub types: Vec<PokemonType>,

    /// Generation filter, e.g. `1` or `gen3` (repeatable; all when omitted)
    #[arg(long = "gen")]
    pub generations: Vec<Generation>,

    #[arg(long, default_value_t = 0)]
    pub min_hp: u32,

    #[arg(long, default_value_t = 0)]
    pub min_attack: u32,

    #[arg(long, default_value_t = 0)]
    pub min_defense: u32,

    #[arg(long, default_value_t = 0)]
    pub min_speed: u32,

    /// Sort key (id, name, hp, attack, total)
    #[arg(long, default_value = "id")]
    pub sort: SortKey,

    /// Resolve and print the evolution tree of this creature
    #[arg(long)]
    pub inspect: Option<u32>,

    /// Comma-separated ids to compare (at most 3 are kept)
    #[arg(long, value_delimiter = ',')]
    pub compare: Vec<u32>,

    /// Comma-separated ids for the team (at most 6 are kept)
    #[arg(long, value_delimiter = ',')]
    pub team: Vec<u32>,

    /// Print JSON snapshots instead of text
    #[arg(long)]
    pub json: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    pub log_level: String,

    /// PokeAPI base URL (overrides POKEDEX_API_BASE)
    #[arg(long)]
    pub api_base: Option<String>,

    /// Number of identities to list (overrides POKEDEX_LISTING_LIMIT)
    #[arg(long)]
    pub limit: Option<u32>,
}

impl Args {
    fn criteria(&self) -> Criteria {
        let criteria = Criteria::default()
            .with_search(self.search.clone())
            .with_types(&self.types)
            .with_min_stats(MinStats::new(
                self.min_hp,
                self.min_attack,
                self.min_defense,
                self.min_speed,
            ))
            .with_sort(self.sort);

        if self.generations.is_empty() {
            criteria
        } else {
            criteria.with_generations(&self.generations)
        }
    }

    fn config(&self) -> CatalogResult<CatalogConfig> {
        let mut config = CatalogConfig::from_env()?;
        if let Some(base) = &self.api_base {
            config = config.with_api_base(base)?;
        }
        if let Some(limit) = self.limit {
            config = config.with_listing_limit(limit);
        }
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> CatalogResult<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    ComponentId::init_cli();
    logging::init_tracing_with_level(Some(&args.log_level));

    let config = args.config()?;
    logging::log_startup(ComponentId::current(), &format!("pokedex against {}", config.api_base));

    let source = PokeApiSource::new(config.clone())?;
    let session = CatalogSession::new(source, config);

    let report = session.load().await?;
    component_info!(
        ComponentId::current(),
        "Loaded {} of {} creatures",
        report.loaded,
        report.requested
    );

    session.replace_criteria(args.criteria()).await;
    session.flush().await?;

    for (kind, ids) in [
        (SelectionKind::Comparison, &args.compare),
        (SelectionKind::Team, &args.team),
    ] {
        for id in ids {
            match session.add_to(kind, *id).await {
                Ok(true) => component_debug!(ComponentId::current(), "Added #{} to {}", id, kind),
                Ok(false) => component_warn!(ComponentId::current(), "#{} not added to {} (full or duplicate)", id, kind),
                Err(e) => component_warn!(ComponentId::current(), "#{} not added to {}: {}", id, kind, e),
            }
        }
    }

    if let Some(id) = args.inspect {
        session.inspect(id).await?;
    }

    let catalog = session.snapshot().await;
    let comparison = session.comparison_snapshot().await;
    let team = session.team_snapshot().await;
    let evolution = session.evolution_snapshot().await;

    if args.json {
        let output = json!({
            "catalog": catalog,
            "comparison": comparison,
            "team": team,
            "evolution": evolution,
        });
        println!("{}", serde_json::to_string_pretty(&output).map_err(CatalogError::from)?);
    } else {
        println!("{} of {} creatures", catalog.visible_count, catalog.total);
        for creature in &catalog.creatures {
            println!("{}", creature_line(creature));
        }
        print_selection(&comparison);
        print_selection(&team);
        print_evolution(&evolution);
    }

    session.shutdown().await;
    Ok(())
}

fn creature_line(creature: &Creature) -> String {
    let types: Vec<&str> = creature.types.iter().map(|t| t.as_str()).collect();
    format!(
        "{:>6}  {:<14} {:<18} total {}",
        creature.dex_number(),
        creature.name,
        types.join("/"),
        creature.total_stats()
    )
}

fn print_selection(snapshot: &SelectionSnapshot) {
    if snapshot.members.is_empty() {
        return;
    }
    println!();
    println!("{} ({}/{})", snapshot.kind, snapshot.members.len(), snapshot.capacity);
    for member in &snapshot.members {
        println!("{}", creature_line(member));
    }
    if let Some(averages) = &snapshot.averages {
        let line: Vec<String> = averages
            .iter()
            .map(|(stat, value)| format!("{} {}", stat.label(), value))
            .collect();
        println!("  average: {}", line.join(", "));
    }
    let coverage: Vec<String> = snapshot
        .type_coverage
        .iter()
        .map(|(pokemon_type, count)| format!("{pokemon_type} x{count}"))
        .collect();
    println!("  types: {}", coverage.join(", "));
}

fn print_evolution(snapshot: &EvolutionSnapshot) {
    match &snapshot.state {
        EvolutionState::Ready { .. } => {
            println!();
            println!("evolution:");
            for step in &snapshot.steps {
                println!("  {}#{:03} {}", "  ".repeat(step.depth), step.species_id, step.name);
            }
        }
        EvolutionState::Failed { creature_id, .. } => {
            println!();
            println!("evolution: no evolution data for #{creature_id}");
        }
        _ => {}
    }
}
