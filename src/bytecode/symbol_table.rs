use std::collections::HashMap;

use crate::bytecode::symbol::Symbol;
use crate::bytecode::symbol_scope::SymbolScope;

#[derive(Debug, Clone)]
pub struct SymbolTable {
    pub outer: Option<Box<SymbolTable>>,
    store: HashMap<String, Symbol>,
    pub num_definitions: usize,
    pub free_symbols: Vec<Symbol>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self {
            outer: None,
            store: HashMap::new(),
            num_definitions: 0,
            free_symbols: Vec::new(),
        }
    }

    pub fn new_enclosed(outer: SymbolTable) -> Self {
        Self {
            outer: Some(Box::new(outer)),
            store: HashMap::new(),
            num_definitions: 0,
            free_symbols: Vec::new(),
        }
    }

    pub fn exists_in_current_scope(&self, name: &str) -> bool {
        self.store.contains_key(name)
    }

    pub fn define(&mut self, name: &str) -> Symbol {
        let scope = if self.outer.is_none() {
            SymbolScope::Global
        } else {
            SymbolScope::Local
        };
        let symbol = Symbol::new(name, scope, self.num_definitions);
        self.store.insert(name.to_string(), symbol.clone());
        self.num_definitions += 1;
        symbol
    }

    pub fn define_builtin(&mut self, index: usize, name: &str) -> Symbol {
        let symbol = Symbol::new(name, SymbolScope::Builtin, index);
        self.store.insert(name.to_string(), symbol.clone());
        symbol
    }

    pub fn define_function_name(&mut self, name: &str) -> Symbol {
        let symbol = Symbol::new(name, SymbolScope::Function, 0);
        self.store.insert(name.to_string(), symbol.clone());
        symbol
    }

    fn define_free(&mut self, original: Symbol) -> Symbol {
        self.free_symbols.push(original.clone());
        let symbol = Symbol::new(original.name.clone(), SymbolScope::Free, self.free_symbols.len() - 1);
        self.store.insert(original.name.clone(), symbol.clone());
        symbol
    }

    /// Resolves `name`, eagerly promoting it to a free variable in every
    /// enclosing scope between its definition and the current one.
    pub fn resolve(&mut self, name: &str) -> Option<Symbol> {
        if let Some(symbol) = self.store.get(name) {
            return Some(symbol.clone());
        }

        let outer = self.outer.as_mut()?;
        let resolved = outer.resolve(name)?;

        match resolved.symbol_scope {
            SymbolScope::Global | SymbolScope::Builtin => Some(resolved),
            _ => Some(self.define_free(resolved)),
        }
    }

    pub fn mark_assigned(&mut self, name: &str) -> Result<(), ()> {
        match self.store.get_mut(name) {
            Some(symbol) => {
                symbol.mark_assigned();
                Ok(())
            }
            None => Err(()),
        }
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}
