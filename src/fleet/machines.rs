//fleet/machines.rs
//
//In-memory VM records. A VM here is only a description (identity, capacity and
//an on/off status), nothing is ever provisioned.

use crate::fleet::groups::ResourceGroup;
use std::fmt;
use std::io::{self, Write};

/// Status value meaning the VM is deallocated. Anything else counts as running.
pub const OFF: &str = "off";

const SEPARATOR: &str = "--------------";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub name: String,
    pub value: String,
}

impl Tag {
    pub fn new(name: &str, value: &str) -> Self {
        Self {
            name: name.to_string(),
            value: value.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VirtualMachine {
    pub hostname: String,
    pub ip: String,
    pub disk_gb: i64,
    pub ram_gb: i64,
    pub status: String,
    /// Name of the group this VM was last associated with
    pub resource_group: Option<String>,
    pub tags: Vec<Tag>,
}

/// What deallocate() did. The Display text is the notification shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Deallocation {
    Deallocated(String),
    AlreadyDeallocated(String),
}

impl fmt::Display for Deallocation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Deallocation::Deallocated(host) => write!(f, "deallocating vm: {}", host),
            Deallocation::AlreadyDeallocated(host) => write!(f, "{} is already deallocated", host),
        }
    }
}

impl VirtualMachine {

    pub fn is_running(&self) -> bool {
        self.status != OFF
    }

    /// Switches the status to "off". Calling it on a VM that is already off leaves
    /// the record untouched. Showing the returned notification is up to the caller.
    pub fn deallocate(&mut self) -> Deallocation {
        if self.is_running() {
            self.status = OFF.to_string();
            Deallocation::Deallocated(self.hostname.clone())
        }
        else {
            Deallocation::AlreadyDeallocated(self.hostname.clone())
        }
    }

    /// Writes every field of the VM to `out`, tags included, in tag order
    pub fn describe<W: Write>(&self, out: &mut W) -> io::Result<()> {
        write!(out, "\n{}\n", SEPARATOR)?;
        writeln!(out, "hostname: {}", self.hostname)?;
        writeln!(out, "ip: {}", self.ip)?;
        writeln!(out, "disk space: {} GB", self.disk_gb)?;
        writeln!(out, "ram: {} GB", self.ram_gb)?;
        writeln!(out, "VM status: {}", self.status)?;
        writeln!(out, "resource group: {}", self.resource_group.as_deref().unwrap_or(""))?;
        for (i, tag) in self.tags.iter().enumerate() {
            write!(out, "\ntag{} name: {}\n", i, tag.name)?;
            writeln!(out, "tag{} value: {}", i, tag.value)?;
        }
        write!(out, "{}\n\n", SEPARATOR)
    }

    /// Records the group name on the VM, then hands the group its own copy of the VM.
    /// The two records are independent afterwards.
    pub fn associate_with(&mut self, group: &mut ResourceGroup) {
        self.resource_group = Some(group.name().to_string());
        group.push_snapshot(self.clone());
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub fn vm(hostname: &str, status: &str) -> VirtualMachine {
        VirtualMachine {
            hostname: hostname.to_string(),
            ip: "10.0.0.4".to_string(),
            disk_gb: 64,
            ram_gb: 8,
            status: status.to_string(),
            resource_group: None,
            tags: Vec::new(),
        }
    }

    fn described(vm: &VirtualMachine) -> String {
        let mut buf: Vec<u8> = Vec::new();
        vm.describe(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn deallocate_turns_a_running_vm_off() {
        let mut v = vm("web01", "on");
        let outcome = v.deallocate();

        assert_eq!(v.status, OFF);
        assert_eq!(outcome, Deallocation::Deallocated("web01".to_string()));
        assert_eq!(outcome.to_string(), "deallocating vm: web01");
    }

    #[test]
    fn any_status_other_than_off_counts_as_running() {
        let mut v = vm("web01", "starting");
        assert!(v.is_running());
        v.deallocate();
        assert!(!v.is_running());
    }

    #[test]
    fn deallocate_twice_is_idempotent() {
        let mut v = vm("web01", "on");
        let first = v.deallocate();
        let after_first = v.clone();
        let second = v.deallocate();

        assert_eq!(v, after_first);
        assert_eq!(v.status, OFF);
        assert_ne!(first.to_string(), second.to_string());
        assert_eq!(second.to_string(), "web01 is already deallocated");
    }

    #[test]
    fn describe_without_tags_has_no_tag_lines() {
        let text = described(&vm("web01", "on"));

        assert!(text.contains("hostname: web01\n"));
        assert!(text.contains("ip: 10.0.0.4\n"));
        assert!(text.contains("disk space: 64 GB\n"));
        assert!(text.contains("ram: 8 GB\n"));
        assert!(text.contains("VM status: on\n"));
        assert!(text.contains("resource group: \n"));
        assert!(!text.contains("tag0"));
    }

    #[test]
    fn describe_lists_tags_in_order() {
        let mut v = vm("web01", "on");
        v.tags = vec![Tag::new("env", "prod"), Tag::new("owner", "ops"), Tag::new("env", "prod")];
        let text = described(&v);

        let names: Vec<&str> = text.lines().filter(|l| l.contains(" name: ")).collect();
        let values: Vec<&str> = text.lines().filter(|l| l.contains(" value: ")).collect();
        assert_eq!(names, vec!["tag0 name: env", "tag1 name: owner", "tag2 name: env"]);
        assert_eq!(values, vec!["tag0 value: prod", "tag1 value: ops", "tag2 value: prod"]);
    }

    #[test]
    fn associate_sets_group_name_and_copies_the_vm() {
        let mut group = ResourceGroup::new("empire");
        let mut v = vm("web01", "on");
        v.associate_with(&mut group);

        assert_eq!(v.resource_group.as_deref(), Some("empire"));
        assert_eq!(group.vms().len(), 1);
        assert_eq!(group.vms()[0], v);
    }

    #[test]
    fn group_copy_does_not_follow_later_changes() {
        let mut group = ResourceGroup::new("empire");
        let mut v = vm("web01", "on");
        v.associate_with(&mut group);
        v.deallocate();

        assert_eq!(v.status, OFF);
        assert_eq!(group.vms()[0].status, "on");
    }
}
