//fleet/mod.rs
//
//The registry of everything known during one run: the VMs loaded from the
//inventory and the resource groups created since. It is passed explicitly to
//whoever needs it instead of living in a global.

pub mod groups;
pub mod machines;

use crate::error::{FleetError, Result};
use crate::inventory::{self, Inventory};
use groups::ResourceGroup;
use machines::{Deallocation, VirtualMachine};
use std::path::Path;

#[derive(Debug, Default)]
pub struct Fleet {
    vms: Inventory,
    groups: Vec<ResourceGroup>,
}

impl Fleet {
    pub fn new(vms: Inventory) -> Self {
        Self {
            vms,
            groups: Vec::new(),
        }
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::new(inventory::load_inventory(path)?))
    }

    pub fn len(&self) -> usize {
        self.vms.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.vms.is_empty()
    }

    /// All VMs, ordered by their inventory name
    pub fn vms(&self) -> impl Iterator<Item = (&String, &VirtualMachine)> {
        self.vms.iter()
    }

    pub fn vm(&self, name: &str) -> Result<&VirtualMachine> {
        self.vms.get(name).ok_or_else(|| FleetError::UnknownVm(name.to_string()))
    }

    pub fn vm_mut(&mut self, name: &str) -> Result<&mut VirtualMachine> {
        self.vms.get_mut(name).ok_or_else(|| FleetError::UnknownVm(name.to_string()))
    }

    /// Returns the group called `name`, creating it empty the first time
    pub fn create_group(&mut self, name: &str) -> &mut ResourceGroup {
        match self.groups.iter().position(|g| g.name() == name) {
            Some(idx) => &mut self.groups[idx],
            None => {
                self.groups.push(ResourceGroup::new(name));
                let last = self.groups.len() - 1;
                &mut self.groups[last]
            }
        }
    }

    pub fn group(&self, name: &str) -> Result<&ResourceGroup> {
        self.groups.iter().find(|g| g.name() == name).ok_or_else(|| FleetError::UnknownGroup(name.to_string()))
    }

    #[allow(dead_code)]
    pub fn groups(&self) -> &[ResourceGroup] {
        &self.groups
    }

    pub fn deallocate(&mut self, vm_name: &str) -> Result<Deallocation> {
        Ok(self.vm_mut(vm_name)?.deallocate())
    }

    /// Associates an existing VM with an existing group
    pub fn associate(&mut self, vm_name: &str, group_name: &str) -> Result<()> {
        let vm = self.vms.get_mut(vm_name).ok_or_else(|| FleetError::UnknownVm(vm_name.to_string()))?;
        let group = self.groups.iter_mut().find(|g| g.name() == group_name).ok_or_else(|| FleetError::UnknownGroup(group_name.to_string()))?;
        vm.associate_with(group);
        Ok(())
    }
}
