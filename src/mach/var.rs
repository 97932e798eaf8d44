use super::Val;
use crate::error;
use crate::lang::{ast::Ident, Error};
use std::collections::HashMap;

type Result<T> = std::result::Result<T, Error>;

/// ## Variable memory
///
/// Arrays are sparse. Each element is its own entry keyed by the base
/// name with `__<index>` appended per subscript.

#[derive(Debug, Default)]
pub struct Var {
    vars: HashMap<Ident, Val>,
}

impl Var {
    pub fn new() -> Var {
        Var::default()
    }

    pub fn clear(&mut self) {
        self.vars.clear();
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    pub fn fetch(&self, ident: &Ident) -> Val {
        match self.vars.get(ident) {
            Some(val) => val.clone(),
            None => {
                if ident.is_string() {
                    Val::String("".into())
                } else {
                    Val::Integer(0)
                }
            }
        }
    }

    pub fn store(&mut self, ident: &Ident, value: Val) -> Result<()> {
        if self.vars.len() > u16::max_value() as usize {
            return Err(error!(OutOfMemory));
        }
        let value = match (ident, value) {
            (Ident::String(_), value @ Val::String(_)) => value,
            (Ident::Plain(_), value @ Val::Integer(_)) => value,
            (Ident::Plain(_), value @ Val::Real(_)) => value,
            (Ident::Plain(_), Val::Boolean(b)) => Val::Integer(b as i32),
            _ => return Err(error!(TypeMismatch)),
        };
        match self.vars.get_mut(ident) {
            Some(var) => *var = value,
            None => {
                self.vars.insert(ident.clone(), value);
            }
        }
        Ok(())
    }

    pub fn array_key(ident: &Ident, subscripts: &[i32]) -> Ident {
        let mut name = ident.name().to_string();
        for index in subscripts {
            name.push_str(&format!("__{}", index));
        }
        match ident {
            Ident::Plain(_) => Ident::Plain(name.into()),
            Ident::String(_) => Ident::String(name.into()),
        }
    }

    /// Every variable in name order.
    pub fn sorted(&self) -> Vec<(&Ident, &Val)> {
        let mut v: Vec<(&Ident, &Val)> = self.vars.iter().collect();
        v.sort_by(|a, b| a.0.name().cmp(b.0.name()));
        v
    }
}
