//! Demo command
//!
//! Usage: calltrace demo [--fail] [--fail-exit --exit-code <N>] [--enter <TEMPLATE>] ...
//!
//! Wraps `test_func(a, b=b)` with the timer, then the logger, and calls it
//! once. The result is printed to stdout as `result: (a, b)` or
//! `result: none` when the call failed and the failure was swallowed.

use anyhow::Context;
use calltrace_core::logging_facility::{self, Profile};
use calltrace_core::{
    function, CallLoggerConfig, Invocable, InvocableExt, Kw, LogTemplateRegistry, Template,
};
use clap::{Args, ValueEnum};

/// Name the demo function is logged under
pub const DEMO_FUNCTION: &str = "test_func";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ProfileArg {
    /// Human-readable logs, debug level
    Development,
    /// JSON logs, info level
    Production,
}

impl From<ProfileArg> for Profile {
    fn from(arg: ProfileArg) -> Self {
        match arg {
            ProfileArg::Development => Profile::Development,
            ProfileArg::Production => Profile::Production,
        }
    }
}

#[derive(Debug, Args)]
pub struct DemoArgs {
    /// Logging profile
    #[arg(long, value_enum, default_value_t = ProfileArg::Development)]
    pub profile: ProfileArg,

    /// Positional argument `a`
    #[arg(short, long, default_value_t = 1)]
    pub a: i32,

    /// Keyword argument `b`
    #[arg(short, long, default_value_t = 7)]
    pub b: i32,

    /// Make the demo function fail
    #[arg(long)]
    pub fail: bool,

    /// Terminate the process when the call fails
    #[arg(long)]
    pub fail_exit: bool,

    /// Exit status used with --fail-exit
    #[arg(long, default_value_t = 0)]
    pub exit_code: i32,

    /// Template registry as inline TOML (`[test_func]` table with enter/leave/error)
    #[arg(long)]
    pub templates_toml: Option<String>,

    /// Override the enter template for the demo function
    #[arg(long)]
    pub enter: Option<String>,

    /// Override the leave template for the demo function
    #[arg(long)]
    pub leave: Option<String>,

    /// Override the error template for the demo function
    #[arg(long)]
    pub error: Option<String>,
}

/// Execute demo command
pub fn execute(args: DemoArgs) -> anyhow::Result<()> {
    let config = build_config(&args)?;
    logging_facility::init(args.profile.into());

    let fail = args.fail;
    let test_func = function(
        DEMO_FUNCTION,
        move |(a, b): (i32, Kw<i32>)| -> anyhow::Result<(i32, i32)> {
            tracing::info!("Inside function {}", module_path!());
            if fail {
                anyhow::bail!("demo failure requested (a={}, b={})", a, *b);
            }
            Ok((a, *b))
        },
    )
    .timed()
    .logged_with(config);

    match test_func.call((args.a, Kw::new("b", args.b))) {
        Some((a, b)) => println!("result: ({a}, {b})"),
        None => println!("result: none"),
    }
    Ok(())
}

fn build_config(args: &DemoArgs) -> anyhow::Result<CallLoggerConfig> {
    let registry = match &args.templates_toml {
        Some(source) => {
            LogTemplateRegistry::from_toml_str(source).context("invalid --templates-toml")?
        }
        None => LogTemplateRegistry::new(),
    };

    let mut set = registry.get(DEMO_FUNCTION).cloned().unwrap_or_default();
    if let Some(raw) = &args.enter {
        set = set.with_enter(Template::parse(raw.as_str()).context("invalid --enter")?);
    }
    if let Some(raw) = &args.leave {
        set = set.with_leave(Template::parse(raw.as_str()).context("invalid --leave")?);
    }
    if let Some(raw) = &args.error {
        set = set.with_error(Template::parse(raw.as_str()).context("invalid --error")?);
    }

    let mut config = CallLoggerConfig::default().with_templates(registry.with(DEMO_FUNCTION, set));
    if args.fail_exit {
        config = config.fail_exit(args.exit_code);
    }
    Ok(config)
}
