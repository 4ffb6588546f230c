//! CLI collaborator: parses stock/piece/option arguments, calls the engine
//! and prints a summary plus (optionally) an ASCII layout render. Not part
//! of the core engine (spec.md §1) — a thin caller like any other.

use clap::{Parser, Subcommand};
use cutstock::{
    optimize_1d, optimize_2d, render, Algorithm1D, Algorithm2D, Heuristic, Options1D, Options2D, PieceInput1D,
    PieceInput2D, SortStrategy, StockInput1D, StockInput2D,
};

#[derive(Parser)]
#[command(name = "cutstock", about = "Stock cutting / bin-packing optimizer")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Optimize 1D bar cutting.
    Oned {
        /// Stock bars as LENGTH:AVAILABLE (e.g. 1000:5).
        #[arg(long = "stock", num_args = 1.., required = true)]
        stock: Vec<String>,

        /// Required pieces as LENGTH:QTY (e.g. 500:2).
        #[arg(long = "pieces", num_args = 1.., required = true)]
        pieces: Vec<String>,

        /// Saw-blade kerf.
        #[arg(long, default_value_t = 0)]
        kerf: u32,

        /// Minimum usable off-cut length to report.
        #[arg(long = "min-usable-waste", default_value_t = 0)]
        min_usable_waste: u32,

        /// FFD, BFD, or BRANCH_BOUND (alias for BFD).
        #[arg(long, default_value = "FFD")]
        algorithm: String,
    },

    /// Optimize 2D sheet cutting.
    Twod {
        /// Stock sheets as WIDTHxHEIGHT:AVAILABLE (e.g. 2400x1200:3).
        #[arg(long = "stock", num_args = 1.., required = true)]
        stock: Vec<String>,

        /// Required pieces as WIDTHxHEIGHT:QTY (e.g. 800x600:3).
        #[arg(long = "pieces", num_args = 1.., required = true)]
        pieces: Vec<String>,

        /// Saw-blade kerf.
        #[arg(long, default_value_t = 0)]
        kerf: u32,

        /// Disable piece rotation.
        #[arg(long)]
        no_rotate: bool,

        /// BOTTOM_LEFT, GUILLOTINE, MAXRECTS, or MAXRECTS_BEST.
        #[arg(long, default_value = "BOTTOM_LEFT")]
        algorithm: String,

        /// MAXRECTS heuristic: BSSF, BLSF, BAF, BL, CP, or BEST.
        #[arg(long)]
        heuristic: Option<String>,

        /// Piece sort strategy: AREA_DESC, SHORT_SIDE, LONG_SIDE, PERIMETER, or DIFFERENCE.
        #[arg(long = "sort", default_value = "AREA_DESC")]
        sort_strategy: String,

        /// Print an ASCII layout of each resulting sheet.
        #[arg(long)]
        layout: bool,
    },
}

fn parse_count_pair(s: &str, sep: char, what: &str) -> Result<(u32, u32), String> {
    let (a, b) = s
        .split_once(sep)
        .ok_or_else(|| format!("invalid {what} '{s}', expected A{sep}B"))?;
    let a: u32 = a.parse().map_err(|_| format!("invalid value in '{s}'"))?;
    let b: u32 = b.parse().map_err(|_| format!("invalid value in '{s}'"))?;
    Ok((a, b))
}

fn parse_1d_stock(specs: &[String]) -> Result<Vec<StockInput1D>, String> {
    specs
        .iter()
        .enumerate()
        .map(|(i, s)| {
            let (length, available) = parse_count_pair(s, ':', "stock")?;
            Ok(StockInput1D {
                id: format!("stock_{i}"),
                length,
                available,
                unit_price: None,
            })
        })
        .collect()
}

fn parse_1d_pieces(specs: &[String]) -> Result<Vec<PieceInput1D>, String> {
    specs
        .iter()
        .enumerate()
        .map(|(i, s)| {
            let (length, quantity) = parse_count_pair(s, ':', "piece")?;
            Ok(PieceInput1D {
                id: format!("piece_{i}"),
                length,
                quantity,
                order_item_id: format!("oi_{i}"),
            })
        })
        .collect()
}

fn parse_2d_dims(s: &str) -> Result<(u32, u32), String> {
    parse_count_pair(s, 'x', "dimensions")
}

fn parse_2d_stock(specs: &[String]) -> Result<Vec<StockInput2D>, String> {
    specs
        .iter()
        .enumerate()
        .map(|(i, s)| {
            let (dims, available) = s
                .split_once(':')
                .ok_or_else(|| format!("invalid stock '{s}', expected WIDTHxHEIGHT:AVAILABLE"))?;
            let (width, height) = parse_2d_dims(dims)?;
            let available: u32 = available.parse().map_err(|_| format!("invalid available in '{s}'"))?;
            Ok(StockInput2D {
                id: format!("stock_{i}"),
                width,
                height,
                available,
                unit_price: None,
            })
        })
        .collect()
}

fn parse_2d_pieces(specs: &[String], can_rotate: bool) -> Result<Vec<PieceInput2D>, String> {
    specs
        .iter()
        .enumerate()
        .map(|(i, s)| {
            let (dims, qty) = s
                .split_once(':')
                .ok_or_else(|| format!("invalid piece '{s}', expected WIDTHxHEIGHT:QTY"))?;
            let (width, height) = parse_2d_dims(dims)?;
            let quantity: u32 = qty.parse().map_err(|_| format!("invalid quantity in '{s}'"))?;
            Ok(PieceInput2D {
                id: format!("piece_{i}"),
                width,
                height,
                quantity,
                order_item_id: format!("oi_{i}"),
                can_rotate,
                grain_direction: Default::default(),
            })
        })
        .collect()
}

fn die(err: impl std::fmt::Display) -> ! {
    eprintln!("Error: {err}");
    std::process::exit(1);
}

fn run_oned(stock: Vec<String>, pieces: Vec<String>, kerf: u32, min_usable_waste: u32, algorithm: String) {
    let stock = parse_1d_stock(&stock).unwrap_or_else(|e| die(e));
    let pieces = parse_1d_pieces(&pieces).unwrap_or_else(|e| die(e));
    let algorithm: Algorithm1D = algorithm.parse().unwrap_or_else(|e| die(e));
    let options = Options1D {
        algorithm,
        kerf,
        min_usable_waste,
    };

    let result = optimize_1d(&pieces, &stock, &options).unwrap_or_else(|e| die(e));

    for (i, bar) in result.bars.iter().enumerate() {
        println!("Bar {} (stock {}):", i + 1, bar.stock_id);
        for cut in &bar.cuts {
            println!("  {} @ {}", cut.length, cut.position);
        }
    }
    if !result.unplaced_pieces.is_empty() {
        println!("Unplaced:");
        for p in &result.unplaced_pieces {
            println!("  {} x{}", p.length, p.quantity);
        }
    }
    println!(
        "Summary: {} bar{} used, {:.1}% waste, success={}",
        result.stock_used_count,
        if result.stock_used_count == 1 { "" } else { "s" },
        result.total_waste_percentage,
        result.success,
    );
}

fn run_twod(
    stock: Vec<String>,
    pieces: Vec<String>,
    kerf: u32,
    no_rotate: bool,
    algorithm: String,
    heuristic: Option<String>,
    sort_strategy: String,
    layout: bool,
) {
    let stock = parse_2d_stock(&stock).unwrap_or_else(|e| die(e));
    let pieces = parse_2d_pieces(&pieces, !no_rotate).unwrap_or_else(|e| die(e));
    let algorithm: Algorithm2D = algorithm.parse().unwrap_or_else(|e| die(e));
    let heuristic: Option<Heuristic> = heuristic
        .map(|h| h.parse::<Heuristic>())
        .transpose()
        .unwrap_or_else(|e| die(e));
    let sort_strategy: SortStrategy = sort_strategy.parse().unwrap_or_else(|e| die(e));

    let options = Options2D {
        algorithm,
        kerf,
        allow_rotation: !no_rotate,
        respect_grain_direction: false,
        heuristic,
        multi_pass: false,
        sort_strategy,
        sliver_threshold: None,
    };

    let result = optimize_2d(&pieces, &stock, &options).unwrap_or_else(|e| die(e));

    for (i, sheet) in result.sheets.iter().enumerate() {
        println!("Sheet {} (stock {}):", i + 1, sheet.stock_id);
        for p in &sheet.placements {
            let rot = if p.rotated { " [rotated]" } else { "" };
            println!("  {}x{} @ ({}, {}){}", p.width, p.height, p.x, p.y, rot);
        }
        if layout {
            print!("{}", render::render_sheet(sheet));
        }
        println!();
    }
    if !result.unplaced_pieces.is_empty() {
        println!("Unplaced:");
        for p in &result.unplaced_pieces {
            println!("  {}x{} x{}", p.width, p.height, p.quantity);
        }
    }
    println!(
        "Summary: {} sheet{} used, {:.1}% waste, success={}",
        result.stock_used_count,
        if result.stock_used_count == 1 { "" } else { "s" },
        result.total_waste_percentage,
        result.success,
    );
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Oned {
            stock,
            pieces,
            kerf,
            min_usable_waste,
            algorithm,
        } => run_oned(stock, pieces, kerf, min_usable_waste, algorithm),
        Command::Twod {
            stock,
            pieces,
            kerf,
            no_rotate,
            algorithm,
            heuristic,
            sort_strategy,
            layout,
        } => run_twod(stock, pieces, kerf, no_rotate, algorithm, heuristic, sort_strategy, layout),
    }
}
