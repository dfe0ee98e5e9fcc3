//jobs/mod.rs
//
//Runs the same shell job once per VM, one thread each, and waits for all of
//them. Workers get their own copy of the VM and share nothing else.

use crate::error::{FleetError, Result};
use crate::fleet::machines::VirtualMachine;
use crate::fleet::Fleet;
use crate::shell_tools;
use crate::utils::replace::{self, ReplaceFailPolicy};
use std::collections::HashMap;
use std::thread;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobReport {
    pub name: String,
    pub hostname: String,
    pub command: String,
    pub stdout: String,
}

fn vm_replacements(name: &str, vm: &VirtualMachine) -> HashMap<String, String> {
    let mut ret = HashMap::new();
    ret.insert("name".to_string(), name.to_string());
    ret.insert("hostname".to_string(), vm.hostname.clone());
    ret.insert("ip".to_string(), vm.ip.clone());
    ret.insert("status".to_string(), vm.status.clone());
    ret
}

fn run_job(name: String, vm: VirtualMachine, command: &str, shell: &str) -> Result<JobReport> {
    let command = replace::replace(command, &vm_replacements(&name, &vm), ReplaceFailPolicy::Warn);
    println_with_time!("{} is running {}", vm.hostname, command);

    let res = shell_tools::run_command(&command, shell);
    if let Some(reason) = res.failure_reason() {
        return Err(FleetError::Execution {
            hostname: vm.hostname,
            command,
            reason,
        });
    }

    Ok(JobReport {
        name,
        hostname: vm.hostname,
        command: res.command().to_string(),
        stdout: res.stdout().to_string(),
    })
}

/// Prints what each job wrote to stdout, one block per VM
pub fn print_reports(reports: &[JobReport]) {
    for report in reports {
        println_with_time!("{} ({}) finished `{}`", report.hostname, report.name, report.command);
        println!("{}", report.stdout);
    }
}

/// Starts one worker per VM and blocks until every worker is done.
/// Reports come back in VM name order; if any job failed, the first failure
/// in that order is returned instead.
pub fn run_on_all(fleet: &Fleet, command: &str, shell: &str) -> Result<Vec<JobReport>> {

    let results: Vec<Result<JobReport>> = thread::scope(|s| {
        let handles: Vec<_> = fleet.vms().map(|(name, vm)| {
            let (name, vm) = (name.clone(), vm.clone());
            let hostname = vm.hostname.clone();
            (hostname, s.spawn(move || run_job(name, vm, command, shell)))
        }).collect();

        handles.into_iter().map(|(hostname, h)| {
            h.join().unwrap_or_else(|_| Err(FleetError::Execution {
                hostname,
                command: command.to_string(),
                reason: "worker thread panicked".to_string(),
            }))
        }).collect()
    });

    results.into_iter().collect()
}
