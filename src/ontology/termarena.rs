use std::collections::HashMap;

use crate::term::{TermId, TermInternal};

pub(crate) struct Arena {
    terms: HashMap<TermId, TermInternal>,
}

impl Arena {
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn insert(&mut self, term: TermInternal) {
        let id = term.id();
        self.terms.insert(id, term);
    }

    pub fn get(&self, id: TermId) -> Option<&TermInternal> {
        self.terms.get(&id)
    }

    pub fn get_unchecked(&self, id: TermId) -> &TermInternal {
        self.terms
            .get(&id)
            .expect("TermId must exist in the Arena")
    }

    pub fn get_mut(&mut self, id: TermId) -> Option<&mut TermInternal> {
        self.terms.get_mut(&id)
    }

    pub fn get_unchecked_mut(&mut self, id: TermId) -> &mut TermInternal {
        self.terms
            .get_mut(&id)
            .expect("TermId must exist in the Arena")
    }
}

impl Default for Arena {
    fn default() -> Self {
        Self {
            terms: HashMap::with_capacity(20_000),
        }
    }
}
