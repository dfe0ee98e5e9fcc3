use crate::fleet::machines::VirtualMachine;
use std::io::{self, Write};

/// A named group holding copies of the VMs associated with it, in association order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceGroup {
    name: String,
    vms: Vec<VirtualMachine>,
}

impl ResourceGroup {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            vms: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn vms(&self) -> &[VirtualMachine] {
        &self.vms
    }

    pub(crate) fn push_snapshot(&mut self, vm: VirtualMachine) {
        self.vms.push(vm);
    }

    pub fn describe<W: Write>(&self, out: &mut W) -> io::Result<()> {
        write!(out, "\n--------------\n")?;
        writeln!(out, "resource group name: {}", self.name)?;
        writeln!(out, "vms belonging to this resource group:")?;
        for vm in &self.vms {
            writeln!(out, "{}", vm.hostname)?;
        }
        write!(out, "--------------\n\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fleet::machines::tests::vm;

    fn hostnames_in_report(group: &ResourceGroup) -> Vec<String> {
        let mut buf: Vec<u8> = Vec::new();
        group.describe(&mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        text.lines()
            .skip_while(|l| *l != "vms belonging to this resource group:")
            .skip(1)
            .take_while(|l| !l.starts_with("---"))
            .map(|l| l.to_string())
            .collect()
    }

    #[test]
    fn new_group_is_empty() {
        let group = ResourceGroup::new("empire");
        assert_eq!(group.name(), "empire");
        assert!(group.vms().is_empty());
        assert!(hostnames_in_report(&group).is_empty());
    }

    #[test]
    fn report_keeps_association_order() {
        let mut group = ResourceGroup::new("empire");
        vm("b-host", "on").associate_with(&mut group);
        vm("a-host", "off").associate_with(&mut group);

        assert_eq!(hostnames_in_report(&group), vec!["b-host", "a-host"]);
    }

    #[test]
    fn same_vm_twice_is_listed_twice() {
        let mut group = ResourceGroup::new("empire");
        let mut v = vm("web01", "on");
        v.associate_with(&mut group);
        v.associate_with(&mut group);

        assert_eq!(hostnames_in_report(&group), vec!["web01", "web01"]);
    }

    #[test]
    fn changing_the_snapshot_leaves_the_original_alone() {
        let mut group = ResourceGroup::new("empire");
        let mut v = vm("web01", "on");
        v.associate_with(&mut group);
        group.vms[0].status = "off".to_string();

        assert_eq!(v.status, "on");
    }
}
