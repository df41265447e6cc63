use anyhow::{bail, Result};
use clap::builder::RangedU64ValueParser;
use clap::{Args as ClapArgs, Parser, Subcommand};

use jobquery::query::{QueryPart, SalaryRange, MAX_VARIATION_COUNT};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct PartArgs {
    /// Free text terms, repeatable
    #[clap(short, long)]
    pub text: Vec<String>,

    /// Restrict to a site, repeatable.
    /// Known job boards are searched when no site is given.
    #[clap(short, long)]
    pub site: Vec<String>,

    /// Postings after this date (YYYY-MM-01)
    #[clap(long)]
    pub after: Option<String>,

    /// Postings before this date (YYYY-MM-01)
    #[clap(long)]
    pub before: Option<String>,

    /// Postings since the month before TEXT, e.g. "February, 2023".
    /// Without TEXT the current month is used.
    #[clap(long, num_args = 0..=1, value_name = "TEXT")]
    pub last_month: Option<Option<String>>,

    /// Salary range, MIN.. or MIN..MAX
    #[clap(long)]
    pub salary: Option<String>,

    /// Read a JSON array of parts from a file ('-' for stdin)
    #[clap(long, conflicts_with_all = ["text", "site", "after", "before", "last_month", "salary"])]
    pub json: Option<String>,
}

impl PartArgs {
    /// Parts in the order the flags are documented.
    pub fn into_parts(self) -> Result<Vec<QueryPart>> {
        let mut parts: Vec<QueryPart> = self.text.into_iter().map(QueryPart::Text).collect();

        if let Some(salary) = self.salary {
            parts.push(QueryPart::Salary(parse_salary(&salary)?));
        }

        parts.extend(self.site.into_iter().map(QueryPart::Site));
        parts.extend(self.after.map(QueryPart::After));
        parts.extend(self.before.map(QueryPart::Before));
        parts.extend(self.last_month.map(QueryPart::LastMonth));

        Ok(parts)
    }
}

fn parse_salary(raw: &str) -> Result<SalaryRange> {
    match QueryPart::decode(raw)? {
        Some(QueryPart::Salary(range)) => Ok(range),
        _ => bail!("salary must be MIN.. or MIN..MAX, got '{raw}'"),
    }
}

fn variation_count_parser() -> RangedU64ValueParser<usize> {
    RangedU64ValueParser::new().range(1..=MAX_VARIATION_COUNT as u64)
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build a query string from parts
    Build {
        #[clap(flatten)]
        parts: PartArgs,
    },
    /// Parse a query string into parts (JSON)
    Parse {
        #[clap(allow_hyphen_values = true)]
        query: String,
    },
    /// Month-by-month copies of a query, most recent first
    Variations {
        #[clap(allow_hyphen_values = true)]
        query: String,

        /// Number of months (overrides config)
        #[clap(short, long, value_parser = variation_count_parser())]
        count: Option<usize>,
    },
    /// Summarize a query as terms, salary and sites
    Shape {
        #[clap(allow_hyphen_values = true)]
        query: String,
    },
    /// Print the search url for a query
    Url {
        #[clap(allow_hyphen_values = true)]
        query: String,
    },
    /// Print the stable identifier of a query
    Id {
        #[clap(allow_hyphen_values = true)]
        query: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_args_into_parts() {
        let args = Args::parse_from([
            "jobquery",
            "build",
            "--text",
            "remote",
            "--site",
            "lever.co",
            "--salary",
            "90000..",
            "--last-month",
        ]);

        let Command::Build { parts } = args.command else {
            panic!("expected build command");
        };

        assert_eq!(
            parts.into_parts().unwrap(),
            vec![
                QueryPart::text("remote"),
                QueryPart::Salary(SalaryRange::at_least(90_000)),
                QueryPart::site("lever.co"),
                QueryPart::LastMonth(None),
            ]
        );
    }

    #[test]
    fn test_last_month_with_text() {
        let args = Args::parse_from(["jobquery", "build", "--last-month", "February, 2023"]);
        let Command::Build { parts } = args.command else {
            panic!("expected build command");
        };
        assert_eq!(
            parts.into_parts().unwrap(),
            vec![QueryPart::last_month(Some("February, 2023"))]
        );
    }

    #[test]
    fn test_salary_must_be_a_range() {
        assert!(parse_salary("90000").is_err());
        assert_eq!(parse_salary("1..2").unwrap(), SalaryRange::between(1, 2));
    }

    #[test]
    fn test_variation_count_is_bounded() {
        let args = Args::parse_from(["jobquery", "variations", "rust", "--count", "1200"]);
        assert!(matches!(args.command, Command::Variations { count: Some(1200), .. }));

        for count in ["0", "1201", "18446744073709551615"] {
            assert!(
                Args::try_parse_from(["jobquery", "variations", "rust", "--count", count]).is_err(),
                "{count}"
            );
        }
    }

    #[test]
    fn test_json_conflicts_with_flags() {
        assert!(Args::try_parse_from(["jobquery", "build", "--json", "-", "--text", "x"]).is_err());
    }
}
