use arith_engine::ast::{Bindings, Expr};
use arith_engine::compress::compress;
use arith_engine::distribute::{distribute, distribute_left, distribute_right};
use arith_engine::lexer::Lexer;
use arith_engine::parser;
use clap::Parser;
use miette::LabeledSpan;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Input {
    /// The formula to process
    formula: String,

    /// Debug the lexer, printing out each token. Does not parse or evaluate the formula.
    #[clap(long, default_value = "false")]
    debug_lexer: bool,

    /// Debug the parser, printing the tree in prefix notation. Does not evaluate the formula.
    #[clap(long, default_value = "false")]
    debug_parser: bool,

    /// Bind a variable for evaluation, e.g. --bind x=2. May be repeated.
    #[clap(long = "bind", value_name = "NAME=VALUE")]
    bindings: Vec<String>,

    /// Expand products over sums this many times, alternating left and right
    /// distribution, printing each step. Does not evaluate the formula.
    #[clap(long, value_name = "ROUNDS")]
    expand: Option<usize>,
}

fn main() {
    let Input {
        formula,
        debug_lexer,
        debug_parser,
        bindings,
        expand,
    } = Input::parse();

    if debug_lexer {
        run_debug_lexer(&formula);
        return;
    }

    let tree = match parser::parse(&formula) {
        Ok(tree) => tree,
        Err(e) => {
            eprintln!(
                "{:?}",
                miette::Report::new(e).with_source_code(formula.clone())
            );
            std::process::exit(1);
        }
    };

    if debug_parser {
        println!("{tree}");
        return;
    }

    if let Some(rounds) = expand {
        run_expansion(tree, rounds);
        return;
    }

    let bindings = match parse_bindings(&bindings) {
        Ok(bindings) => bindings,
        Err(e) => {
            eprintln!("{:?}", e);
            std::process::exit(1);
        }
    };

    let reduced = compress(&tree, &bindings, false);
    match reduced.number_value() {
        Some(value) => println!("{value}"),
        None => println!("{}", reduced.to_infix()),
    }
}

fn run_debug_lexer(formula: &str) {
    for token in Lexer::new(formula) {
        match token {
            Ok(t) => {
                let diag = miette::miette!(
                    labels = vec![LabeledSpan::at(
                        t.span.start..t.span.end,
                        format!("{:?}", t.kind)
                    )],
                    severity = miette::Severity::Advice,
                    "found a token",
                )
                .with_source_code(formula.to_string());
                eprintln!("{:?}", diag);
            }
            Err(e) => {
                eprintln!(
                    "{:?}",
                    miette::Report::new(e).with_source_code(formula.to_string())
                );
                std::process::exit(1);
            }
        }
    }
}

fn run_expansion(tree: Expr, rounds: usize) {
    println!("{}", tree.to_infix());

    let mut tree = tree;
    for round in 0..rounds {
        let (direction, rule): (&str, fn(&Expr) -> Expr) = if round % 2 == 0 {
            ("left", distribute_left)
        } else {
            ("right", distribute_right)
        };
        tree = distribute(&tree, rule);
        println!("expanding {direction} yields {}", tree.to_infix());
    }
}

fn parse_bindings(pairs: &[String]) -> miette::Result<Bindings> {
    let mut bindings = Bindings::new();
    for pair in pairs {
        let Some((name, value)) = pair.split_once('=') else {
            return Err(miette::miette!("expected NAME=VALUE, found '{pair}'"));
        };
        let value = value
            .parse::<f64>()
            .map_err(|e| miette::miette!("invalid value for '{name}': {e}"))?;
        bindings.insert(name.to_string(), value);
    }

    Ok(bindings)
}
