//main.rs
//
//vmfleet: loads a YAML description of VMs, prints them, deallocates them,
//groups them, and can run a shell job on all of them at once.

// =========== Libraries =============
extern crate serde;
#[macro_use]
extern crate lazy_static;

// ========== General Data ===========
#[macro_use]
mod logger;
mod error;
mod paths;
mod utils;
mod shell_tools;

// ============ Model ================
mod inventory;
mod fleet;
mod jobs;

use error::{FleetError, Result};
use fleet::Fleet;
use std::env;
use std::io::{self, Write};
use utils::settings::{self, Settings};

const USAGE: &str = "usage: vmfleet [--inventory PATH] <command> [args]

commands:
  demo                   run the whole scenario (default)
  describe [VM...]       print the named VMs, or every VM
  dealloc VM...          deallocate VMs and print them
  associate GROUP VM...  add VMs to a resource group and print the group
  run [COMMAND]          run a shell command on every VM at once
  help                   show this message";

fn main() {
    let args: Vec<String> = env::args().skip(1).collect();

    if let Err(e) = dispatch(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Pulls `--inventory PATH` out of the arguments, wherever it is
fn take_inventory_flag(args: &mut Vec<String>) -> Result<Option<String>> {
    match args.iter().position(|a| a == "--inventory") {
        Some(idx) => {
            if idx + 1 >= args.len() {
                return Err(FleetError::Usage("--inventory needs a path".to_string()));
            }
            let path = args.remove(idx + 1);
            args.remove(idx);
            Ok(Some(path))
        }
        None => Ok(None),
    }
}

fn dispatch(mut args: Vec<String>) -> Result<()> {
    let mut settings = settings::load_settings(paths::SETTINGS)?;
    if let Some(path) = take_inventory_flag(&mut args)? {
        settings.inventory = path;
    }

    let command = args.first().map(|a| a.to_lowercase());
    let rest = if args.is_empty() { &args[..] } else { &args[1..] };

    match command.as_deref() {
        None | Some("demo") => demo(&settings).map(|_| ()),
        Some("describe") | Some("show") | Some("info") => describe(&settings, rest),
        Some("dealloc") | Some("deallocate") => dealloc(&settings, rest).map(|_| ()),
        Some("associate") | Some("assoc") => associate(&settings, rest).map(|_| ()),
        Some("run") => run(&settings, rest).map(|_| ()),
        Some("help") | Some("-h") | Some("--help") => {
            println!("{}", USAGE);
            Ok(())
        }
        Some(other) => Err(FleetError::Usage(format!("unknown command '{}'\n\n{}", other, USAGE))),
    }
}

fn load_fleet(settings: &Settings) -> Result<Fleet> {
    let fleet = Fleet::load(&settings.inventory)?;
    println_with_time!("Loaded {} VMs from {}", fleet.len(), settings.inventory);
    Ok(fleet)
}

fn stdout_err(e: io::Error) -> FleetError {
    FleetError::Io { path: "<stdout>".to_string(), source: e }
}

fn describe(settings: &Settings, names: &[String]) -> Result<()> {
    let fleet = load_fleet(settings)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if names.is_empty() {
        for (_, vm) in fleet.vms() {
            vm.describe(&mut out).map_err(stdout_err)?;
        }
    }
    else {
        for name in names {
            fleet.vm(name)?.describe(&mut out).map_err(stdout_err)?;
        }
    }
    Ok(())
}

/// Deallocates a VM, shows the notification, then the VM itself
fn deallocate_and_show<W: Write>(fleet: &mut Fleet, name: &str, out: &mut W) -> Result<()> {
    let outcome = fleet.deallocate(name)?;
    writeln!(out, "{}", outcome).map_err(stdout_err)?;
    fleet.vm(name)?.describe(out).map_err(stdout_err)
}

fn dealloc(settings: &Settings, names: &[String]) -> Result<Fleet> {
    if names.is_empty() {
        return Err(FleetError::Usage("dealloc needs at least one VM name".to_string()));
    }
    let mut fleet = load_fleet(settings)?;
    for name in names {
        deallocate_and_show(&mut fleet, name, &mut io::stdout())?;
    }
    Ok(fleet)
}

fn associate(settings: &Settings, args: &[String]) -> Result<Fleet> {
    let (group, names) = match args.split_first() {
        Some((group, names)) if !names.is_empty() => (group, names),
        _ => return Err(FleetError::Usage("associate needs a group name and at least one VM name".to_string())),
    };
    let mut fleet = load_fleet(settings)?;
    fleet.create_group(group);
    for name in names {
        fleet.associate(name, group)?;
    }

    let rg = fleet.group(group)?;
    println_with_time!("Resource group {} now holds {} VMs", rg.name(), rg.vms().len());
    rg.describe(&mut io::stdout()).map_err(stdout_err)?;
    Ok(fleet)
}

fn run(settings: &Settings, args: &[String]) -> Result<Vec<jobs::JobReport>> {
    let command = if args.is_empty() { settings.job_command.clone() } else { args.join(" ") };
    let fleet = load_fleet(settings)?;
    let reports = jobs::run_on_all(&fleet, &command, &settings.shell)?;
    jobs::print_reports(&reports);
    println_with_time!("All {} jobs finished", reports.len());
    Ok(reports)
}

/// The full walkthrough: jobs on every VM, then deallocation and grouping of VM1 and VM2
fn demo(settings: &Settings) -> Result<Fleet> {
    let mut fleet = load_fleet(settings)?;
    let mut out = io::stdout();
    let group = settings.resource_group.as_str();

    // every "VM" runs the same job, we only move on once all of them are done
    let reports = jobs::run_on_all(&fleet, &settings.job_command, &settings.shell)?;
    jobs::print_reports(&reports);

    deallocate_and_show(&mut fleet, "VM1", &mut out)?;

    fleet.create_group(group);
    fleet.associate("VM1", group)?;
    fleet.group(group)?.describe(&mut out).map_err(stdout_err)?;
    fleet.vm("VM1")?.describe(&mut out).map_err(stdout_err)?;

    println!("grab the IP of vm2");
    println!("{}", fleet.vm("VM2")?.ip);

    fleet.associate("VM2", group)?;
    fleet.group(group)?.describe(&mut out).map_err(stdout_err)?;
    out.flush().map_err(stdout_err)?;
    Ok(fleet)
}
