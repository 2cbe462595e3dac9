//! Typed, introspectable pattern parameters.
//!
//! A pattern declares its parameters once during init; their indices
//! stay stable for the instance lifetime, which is what persistence and
//! crossfade snapshots key on. Values bulk-transfer to and from flat
//! `u32` arrays: integers and checkbox bitfields raw, colors as packed
//! hex, momentary actions excluded.

use alloc::vec::Vec;

use crate::color::{ColorChannel, LedColor};

/// Parameter kind, as exposed to configuration UIs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    Int,
    /// Bitfield with one named checkbox per bit.
    Checkbox,
    Color,
    /// Momentary button; carries no persisted value.
    Action,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamValue<C: ColorChannel> {
    Int(i32),
    Checkbox(u32),
    Color(LedColor<C>),
    Action,
}

/// One declared parameter: a name, an optional checkbox label list
/// (comma separated, one label per bit), and a typed value.
#[derive(Debug, Clone)]
pub struct Param<C: ColorChannel> {
    pub name: &'static str,
    pub checkbox_names: &'static str,
    pub value: ParamValue<C>,
}

impl<C: ColorChannel> Param<C> {
    pub fn kind(&self) -> ParamKind {
        match self.value {
            ParamValue::Int(_) => ParamKind::Int,
            ParamValue::Checkbox(_) => ParamKind::Checkbox,
            ParamValue::Color(_) => ParamKind::Color,
            ParamValue::Action => ParamKind::Action,
        }
    }
}

/// Ordered parameter list with a dirty flag.
///
/// Every accessor treats an out-of-range index as a no-op; parameters
/// never panic their pattern off the display.
#[derive(Debug, Clone, Default)]
pub struct ParamSet<C: ColorChannel> {
    items: Vec<Param<C>>,
    changed: bool,
}

impl<C: ColorChannel> ParamSet<C> {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            changed: true,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Drop all declared parameters; used when a pattern re-inits.
    pub fn reset(&mut self) {
        self.items.clear();
        self.changed = true;
    }

    pub fn add_int(&mut self, name: &'static str, value: i32) {
        self.push(name, "", ParamValue::Int(value));
    }

    pub fn add_checkbox(&mut self, name: &'static str, checkbox_names: &'static str, value: u32) {
        self.push(name, checkbox_names, ParamValue::Checkbox(value));
    }

    pub fn add_color(&mut self, name: &'static str, value: LedColor<C>) {
        self.push(name, "", ParamValue::Color(value));
    }

    pub fn add_action(&mut self, name: &'static str) {
        self.push(name, "", ParamValue::Action);
    }

    fn push(&mut self, name: &'static str, checkbox_names: &'static str, value: ParamValue<C>) {
        self.items.push(Param {
            name,
            checkbox_names,
            value,
        });
    }

    pub fn get(&self, ix: usize) -> Option<&Param<C>> {
        self.items.get(ix)
    }

    pub fn name(&self, ix: usize) -> Option<&'static str> {
        self.items.get(ix).map(|p| p.name)
    }

    pub fn checkbox_names(&self, ix: usize) -> Option<&'static str> {
        self.items.get(ix).map(|p| p.checkbox_names)
    }

    pub fn kind(&self, ix: usize) -> Option<ParamKind> {
        self.items.get(ix).map(Param::kind)
    }

    /// Integer view of a parameter: ints and checkboxes read raw,
    /// colors read as packed hex, anything else as 0.
    pub fn value_int(&self, ix: usize) -> i32 {
        match self.items.get(ix).map(|p| &p.value) {
            Some(ParamValue::Int(v)) => *v,
            Some(ParamValue::Checkbox(v)) => *v as i32,
            Some(ParamValue::Color(co)) => co.to_hex() as i32,
            _ => 0,
        }
    }

    /// Color view of a parameter; non-color parameters read black.
    pub fn value_color(&self, ix: usize) -> LedColor<C> {
        match self.items.get(ix).map(|p| &p.value) {
            Some(ParamValue::Color(co)) => *co,
            _ => LedColor::default(),
        }
    }

    /// Set by integer: color parameters decode the value as hex,
    /// actions ignore it. Marks the set changed.
    pub fn set_int(&mut self, ix: usize, v: i32) {
        let Some(param) = self.items.get_mut(ix) else {
            return;
        };
        match &mut param.value {
            ParamValue::Int(value) => *value = v,
            ParamValue::Checkbox(value) => *value = v as u32,
            ParamValue::Color(value) => *value = LedColor::from_hex(v as u32),
            ParamValue::Action => {}
        }
        self.changed = true;
    }

    /// Set by color: integer parameters take the packed hex value.
    /// Marks the set changed.
    pub fn set_color(&mut self, ix: usize, co: LedColor<C>) {
        let Some(param) = self.items.get_mut(ix) else {
            return;
        };
        match &mut param.value {
            ParamValue::Color(value) => *value = co,
            ParamValue::Int(value) => *value = co.to_hex() as i32,
            ParamValue::Checkbox(_) | ParamValue::Action => {}
        }
        self.changed = true;
    }

    /// Copy a contiguous parameter range into a flat `u32` array.
    ///
    /// The whole output is zeroed first so excess storage stays
    /// deterministic. Actions store 0.
    pub fn read(&self, first: usize, out: &mut [u32]) {
        out.fill(0);
        for (slot, param) in out.iter_mut().zip(self.items.iter().skip(first)) {
            *slot = match &param.value {
                ParamValue::Int(v) => *v as u32,
                ParamValue::Checkbox(v) => *v,
                ParamValue::Color(co) => co.to_hex(),
                ParamValue::Action => 0,
            };
        }
    }

    /// Restore a contiguous parameter range from a flat `u32` array.
    ///
    /// 16-bit colors come back with 8 bits of precision. Actions are
    /// skipped. Marks the set changed.
    pub fn write(&mut self, first: usize, values: &[u32]) {
        for (v, param) in values.iter().zip(self.items.iter_mut().skip(first)) {
            match &mut param.value {
                ParamValue::Int(value) => *value = *v as i32,
                ParamValue::Checkbox(value) => *value = *v,
                ParamValue::Color(value) => *value = LedColor::from_hex(*v),
                ParamValue::Action => {}
            }
        }
        self.changed = true;
    }

    /// Clear and report the dirty flag.
    pub fn take_changed(&mut self) -> bool {
        let changed = self.changed;
        self.changed = false;
        changed
    }

    pub fn mark_changed(&mut self) {
        self.changed = true;
    }
}
