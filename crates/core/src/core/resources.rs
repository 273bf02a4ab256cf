//! Resource table.
//!
//! Tracks, per named resource (a register), its current value and the cycle
//! at which its pending writer retires. This is the reservation half of the
//! hazard model: issuing an instruction reserves its destination until its
//! retire cycle, and readers check `busy_until` before they may issue.
//!
//! The table does not enforce the single-writer rule itself; the scheduler
//! never reserves a resource whose previous writer is still in flight.

use std::collections::HashMap;

use serde::Serialize;

use crate::common::constants::{DEFAULT_REGISTER_COUNT, DEFAULT_REGISTER_PREFIX};
use crate::common::error::SimError;
use crate::isa::instruction::Instruction;

/// State of one resource.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Resource {
    /// Current architectural value.
    pub value: i64,
    /// Cycle at which the latest writer retires; `0` means free from the first cycle.
    pub busy_until: u64,
}

/// Named resources in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceTable {
    names: Vec<String>,
    slots: Vec<Resource>,
    index: HashMap<String, usize>,
}

impl ResourceTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self {
            names: Vec::new(),
            slots: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Creates `count` registers named `{prefix}0` .. `{prefix}{count-1}`, all zero and free.
    pub fn with_registers(count: usize, prefix: &str) -> Self {
        let mut table = Self::new();
        for i in 0..count {
            table.add(format!("{prefix}{i}"));
        }
        table
    }

    /// Adds a resource. Adding an existing name leaves it untouched.
    pub fn add(&mut self, name: impl Into<String>) {
        let name = name.into();
        if self.index.contains_key(&name) {
            return;
        }
        let _ = self.index.insert(name.clone(), self.slots.len());
        self.names.push(name);
        self.slots.push(Resource::default());
    }

    /// `true` if `name` is in the table.
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Number of resources.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// `true` if the table has no resources.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Looks up a resource.
    pub fn get(&self, name: &str) -> Option<&Resource> {
        self.index.get(name).map(|&i| &self.slots[i])
    }

    /// Cycle until which `name` is reserved.
    pub fn busy_until(&self, name: &str) -> Result<u64, SimError> {
        self.slot(name).map(|r| r.busy_until)
    }

    /// `true` if `name` has no pending writer at `cycle`.
    pub fn is_free_at(&self, name: &str, cycle: u64) -> Result<bool, SimError> {
        Ok(self.busy_until(name)? <= cycle)
    }

    /// Reserves `name` until `cycle`, overwriting any earlier reservation.
    pub fn reserve(&mut self, name: &str, cycle: u64) -> Result<(), SimError> {
        self.slot_mut(name)?.busy_until = cycle;
        Ok(())
    }

    /// Current value of `name`.
    pub fn value(&self, name: &str) -> Result<i64, SimError> {
        self.slot(name).map(|r| r.value)
    }

    /// Overwrites the value of `name`.
    pub fn set_value(&mut self, name: &str, value: i64) -> Result<(), SimError> {
        self.slot_mut(name)?.value = value;
        Ok(())
    }

    /// Applies `inst` to the current register values.
    ///
    /// Reads the operand values, evaluates the operation and writes the
    /// result into the destination. Memory operations produce no value and
    /// leave the table unchanged. Returns the value written, if any.
    pub fn execute(&mut self, inst: &Instruction) -> Result<Option<i64>, SimError> {
        let operands = inst
            .operands()
            .iter()
            .map(|name| self.value(name))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| e.attach(inst.id()))?;

        let Some(result) = inst.operation().evaluate(&operands) else {
            return Ok(None);
        };
        if let Some(dest) = inst.destination() {
            self.set_value(dest, result).map_err(|e| e.attach(inst.id()))?;
        }
        Ok(Some(result))
    }

    /// Iterates `(name, resource)` in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Resource)> + '_ {
        self.names.iter().map(String::as_str).zip(self.slots.iter())
    }

    /// Renders the register values, four per line.
    pub fn dump(&self) -> String {
        let cells: Vec<String> = self
            .iter()
            .map(|(name, r)| format!("{name:<4}={:>12}", r.value))
            .collect();
        let mut out = String::new();
        for row in cells.chunks(4) {
            out.push_str(&row.join("  "));
            out.push('\n');
        }
        out
    }

    fn slot(&self, name: &str) -> Result<&Resource, SimError> {
        self.get(name).ok_or_else(|| unknown(name))
    }

    fn slot_mut(&mut self, name: &str) -> Result<&mut Resource, SimError> {
        match self.index.get(name) {
            Some(&i) => Ok(&mut self.slots[i]),
            None => Err(unknown(name)),
        }
    }
}

impl Default for ResourceTable {
    /// Eight zeroed registers `R0`-`R7`.
    fn default() -> Self {
        Self::with_registers(DEFAULT_REGISTER_COUNT, DEFAULT_REGISTER_PREFIX)
    }
}

fn unknown(name: &str) -> SimError {
    SimError::UnknownResource {
        instruction: None,
        name: name.to_string(),
    }
}
