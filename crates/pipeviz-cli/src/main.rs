mod config;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use config::Config;
use pipeviz_core::diagrams::{
    self, ArchitectureOptions, CicdOptions, Diagram, DockerOptions, PromotionOptions,
};
use pipeviz_core::{
    Catalog, Decoration, PatternSheet, PipelineDefinition, RenderedGraph, Renderer, Toggles,
    parse_pipeline_dot, render_definition, to_dot, validate,
};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "pipeviz")]
#[command(about = "Render ML pipeline patterns and CI/CD diagrams as Graphviz DOT")]
struct Cli {
    /// Directory of extra `*.dot` pattern definitions appended to the built-in catalog.
    #[arg(long, global = true, env = "PIPEVIZ_PATTERN_DIR")]
    pattern_dir: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    List(ListArgs),
    Render(RenderArgs),
    Sheet(SheetArgs),
    Diagram(DiagramArgs),
    Lint(LintArgs),
}

#[derive(clap::Args, Debug)]
struct ListArgs {
    #[arg(long, action = ArgAction::SetTrue)]
    json: bool,
}

#[derive(clap::Args, Debug)]
struct RenderArgs {
    #[arg(long)]
    pattern: Option<String>,
    #[arg(long)]
    dot_file: Option<PathBuf>,
    /// Append each step's execution environment to its label.
    #[arg(long, action = ArgAction::SetTrue)]
    annotated: bool,
    #[arg(long = "with")]
    decorations: Vec<Decoration>,
    #[arg(long, action = ArgAction::SetTrue)]
    all_decorations: bool,
    #[arg(long, value_enum, env = "PIPEVIZ_FORMAT", default_value_t = OutputFormat::Dot)]
    format: OutputFormat,
}

#[derive(clap::Args, Debug)]
struct SheetArgs {
    #[arg(long)]
    pattern: String,
    #[arg(long, action = ArgAction::SetTrue)]
    json: bool,
}

#[derive(clap::Args, Debug)]
struct DiagramArgs {
    diagram: Diagram,
    /// Optional lane or node to leave out, e.g. `artifact-registry` or `docker-lane`.
    #[arg(long = "without")]
    without: Vec<String>,
    #[arg(long, action = ArgAction::SetTrue)]
    rebuild_per_env: bool,
    #[arg(long, value_enum, env = "PIPEVIZ_FORMAT", default_value_t = OutputFormat::Dot)]
    format: OutputFormat,
}

#[derive(clap::Args, Debug)]
struct LintArgs {
    #[arg(long)]
    pattern: Option<String>,
    #[arg(long)]
    dot_file: Option<PathBuf>,
    #[arg(long, action = ArgAction::SetTrue)]
    json: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Dot,
    Json,
}

fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    config::init_tracing();

    let cli = Cli::parse();
    let config = Config {
        pattern_dir: cli.pattern_dir,
    };
    let result = match cli.command {
        Commands::List(args) => list_command(&config, args),
        Commands::Render(args) => render_command(&config, args),
        Commands::Sheet(args) => sheet_command(&config, args),
        Commands::Diagram(args) => diagram_command(args),
        Commands::Lint(args) => lint_command(&config, args),
    };

    match result {
        Ok(code) => code,
        Err(error) => {
            eprintln!("error: {error}");
            ExitCode::from(1)
        }
    }
}

#[derive(Serialize)]
struct PatternListing<'a> {
    name: &'a str,
    summary: &'a str,
    steps: usize,
}

fn list_command(config: &Config, args: ListArgs) -> Result<ExitCode, String> {
    let catalog = config.load_catalog()?;

    if args.json {
        let listing: Vec<PatternListing<'_>> = catalog
            .definitions()
            .map(|definition| PatternListing {
                name: &definition.name,
                summary: &definition.summary,
                steps: definition.steps.len(),
            })
            .collect();
        print_json(&listing)?;
    } else {
        for definition in catalog.definitions() {
            if definition.summary.is_empty() {
                println!("{}", definition.name);
            } else {
                println!("{}: {}", definition.name, definition.summary);
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn render_command(config: &Config, args: RenderArgs) -> Result<ExitCode, String> {
    let mut toggles = Toggles::new().annotated(args.annotated);
    let decorations = if args.all_decorations {
        Decoration::ALL.to_vec()
    } else {
        args.decorations
    };
    for decoration in decorations {
        toggles = toggles.with(decoration);
    }

    let graph = match (args.pattern.as_deref(), args.dot_file.as_deref()) {
        (Some(_), Some(_)) => return Err("provide only one of --pattern or --dot-file".to_string()),
        (None, None) => return Err("one of --pattern or --dot-file is required".to_string()),
        (Some(name), None) => {
            let catalog = config.load_catalog()?;
            Renderer::new(&catalog)
                .render(name, &toggles)
                .map_err(|e| e.to_string())?
        }
        (None, Some(path)) => render_definition(&load_dot_definition(path)?, &toggles),
    };

    print_graph(&graph, args.format)?;
    Ok(ExitCode::SUCCESS)
}

fn sheet_command(config: &Config, args: SheetArgs) -> Result<ExitCode, String> {
    let catalog = config.load_catalog()?;
    let definition = catalog.get(&args.pattern).map_err(|e| e.to_string())?;
    let sheet = PatternSheet::from_definition(definition);

    if args.json {
        print_json(&sheet)?;
    } else {
        print!("{}", sheet.to_text());
    }
    Ok(ExitCode::SUCCESS)
}

fn diagram_command(args: DiagramArgs) -> Result<ExitCode, String> {
    let graph = build_diagram(args.diagram, &args.without, args.rebuild_per_env)?;
    print_graph(&graph, args.format)?;
    Ok(ExitCode::SUCCESS)
}

fn build_diagram(
    diagram: Diagram,
    without: &[String],
    rebuild_per_env: bool,
) -> Result<RenderedGraph, String> {
    let lanes: &[&str] = match diagram {
        Diagram::Architecture => &["artifact-registry"],
        Diagram::CicdCycle => &["docker-lane", "quality-gates", "observability"],
        Diagram::DockerFlow => &["base-image", "build-cache"],
        Diagram::EnvPromotion => &["manual-approval", "project-split"],
    };
    if let Some(unknown) = without.iter().find(|lane| !lanes.contains(&lane.as_str())) {
        return Err(format!(
            "'{unknown}' is not an optional part of the {diagram} diagram; expected one of: {}",
            lanes.join(", ")
        ));
    }
    if rebuild_per_env && diagram != Diagram::EnvPromotion {
        return Err("--rebuild-per-env only applies to the promotion diagram".to_string());
    }
    let keep = |lane: &str| !without.iter().any(|excluded| excluded == lane);

    let graph = match diagram {
        Diagram::Architecture => diagrams::architecture(ArchitectureOptions {
            include_artifact_registry: keep("artifact-registry"),
        }),
        Diagram::CicdCycle => diagrams::cicd_cycle(CicdOptions {
            docker_lane: keep("docker-lane"),
            quality_gates: keep("quality-gates"),
            observability: keep("observability"),
        }),
        Diagram::DockerFlow => diagrams::docker_flow(DockerOptions {
            base_image: keep("base-image"),
            build_cache: keep("build-cache"),
        }),
        Diagram::EnvPromotion => diagrams::env_promotion(PromotionOptions {
            manual_approval: keep("manual-approval"),
            project_split: keep("project-split"),
            rebuild_per_env,
        }),
    };
    Ok(graph)
}

fn lint_command(config: &Config, args: LintArgs) -> Result<ExitCode, String> {
    let definition = match (args.pattern.as_deref(), args.dot_file.as_deref()) {
        (Some(_), Some(_)) => return Err("provide only one of --pattern or --dot-file".to_string()),
        (None, None) => return Err("one of --pattern or --dot-file is required".to_string()),
        (Some(name), None) => lookup(&config.load_catalog()?, name)?,
        (None, Some(path)) => load_dot_definition(path)?,
    };

    let diagnostics = validate(&definition, &[]);
    if args.json {
        print_json(&diagnostics)?;
    } else if diagnostics.is_empty() {
        println!("{}: ok", definition.name);
    } else {
        for diagnostic in &diagnostics {
            println!("{diagnostic}");
        }
    }

    if diagnostics.iter().any(|d| d.is_error()) {
        Ok(ExitCode::from(2))
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

fn lookup(catalog: &Catalog, name: &str) -> Result<PipelineDefinition, String> {
    catalog.get(name).cloned().map_err(|e| e.to_string())
}

fn load_dot_definition(path: &Path) -> Result<PipelineDefinition, String> {
    let source = std::fs::read_to_string(path)
        .map_err(|e| format!("failed reading DOT file '{}': {e}", path.display()))?;
    parse_pipeline_dot(&source).map_err(|e| e.to_string())
}

fn print_graph(graph: &RenderedGraph, format: OutputFormat) -> Result<(), String> {
    match format {
        OutputFormat::Dot => {
            println!("{}", to_dot(graph));
            Ok(())
        }
        OutputFormat::Json => print_json(graph),
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), String> {
    let json = serde_json::to_string_pretty(value).map_err(|e| e.to_string())?;
    println!("{json}");
    Ok(())
}
