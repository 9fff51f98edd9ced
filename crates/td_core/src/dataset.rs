//! The dataset model: sources, variables, claims, and the three sparse
//! incidence matrices (`SC`, `MUT_EX`, optional `IMP`) built from a stream
//! of `(source, variable, value)` triples.

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use crate::errors::CoreError;
use crate::ids::IdTable;
use crate::sparse::CsrMatrix;

/// An immutable truth-discovery dataset.
///
/// `S` is the source-label type, `Var` the variable-label type, and `Val`
/// the value type; all three need only be `Hash + Eq + Clone`, so callers
/// can use strings, small enums, interned symbols, or whatever else keys a
/// `HashMap` in their domain.
pub struct Dataset<S, Var, Val> {
    source_ids: IdTable<S>,
    var_ids: IdTable<Var>,
    val_ids: IdTable<Val>,
    claim_ids: IdTable<(u32, u32)>,

    sc: CsrMatrix,
    sc_t: CsrMatrix,
    mut_ex: CsrMatrix,
    imp: Option<CsrMatrix>,
    imp_t: Option<CsrMatrix>,
}

impl<S, Var, Val> Dataset<S, Var, Val>
where
    S: Eq + Hash + Clone,
    Var: Eq + Hash + Clone,
    Val: Eq + Hash + Clone,
{
    pub fn builder() -> DatasetBuilder<S, Var, Val> {
        DatasetBuilder::new()
    }

    pub fn num_sources(&self) -> usize {
        self.source_ids.len()
    }

    pub fn num_variables(&self) -> usize {
        self.var_ids.len()
    }

    pub fn num_claims(&self) -> usize {
        self.claim_ids.len()
    }

    pub fn sc(&self) -> &CsrMatrix {
        &self.sc
    }

    pub fn sc_t(&self) -> &CsrMatrix {
        &self.sc_t
    }

    pub fn mut_ex(&self) -> &CsrMatrix {
        &self.mut_ex
    }

    pub fn imp(&self) -> Option<&CsrMatrix> {
        self.imp.as_ref()
    }

    pub fn imp_t(&self) -> Option<&CsrMatrix> {
        self.imp_t.as_ref()
    }

    /// Claims made by variable `var_id`; empty if `var_id` is out of range.
    pub fn var_of_claim(&self, claim_id: u32) -> Option<(&Var, &Val)> {
        let &(var_id, val_id) = self.claim_ids.label_of(claim_id)?;
        Some((
            self.var_ids.label_of(var_id)?,
            self.val_ids.label_of(val_id)?,
        ))
    }

    pub fn source_label(&self, source_id: u32) -> Option<&S> {
        self.source_ids.label_of(source_id)
    }

    pub fn var_label(&self, var_id: u32) -> Option<&Var> {
        self.var_ids.label_of(var_id)
    }

    pub fn var_id(&self, var: &Var) -> Option<u32> {
        self.var_ids.get(var)
    }

    /// Convert a per-source vector (ordered by source ID) into a label-keyed
    /// trust dictionary.
    pub fn trust_dict_from(&self, trust: &[f64]) -> HashMap<S, f64> {
        assert_eq!(trust.len(), self.num_sources());
        (0..trust.len())
            .map(|i| (self.source_ids.label_of(i as u32).unwrap().clone(), trust[i]))
            .collect()
    }

    /// Convert a per-claim vector (ordered by claim ID) into nested
    /// `{variable -> {value -> belief}}` dictionaries.
    pub fn belief_dict_from(&self, belief: &[f64]) -> HashMap<Var, HashMap<Val, f64>> {
        assert_eq!(belief.len(), self.num_claims());
        let mut out: HashMap<Var, HashMap<Val, f64>> = HashMap::new();
        for (claim_id, &score) in belief.iter().enumerate() {
            let &(var_id, val_id) = self.claim_ids.label_of(claim_id as u32).unwrap();
            let var = self.var_ids.label_of(var_id).unwrap().clone();
            let val = self.val_ids.label_of(val_id).unwrap().clone();
            out.entry(var).or_default().insert(val, score);
        }
        out
    }
}

/// Builds a [`Dataset`] from a stream of `(source, variable, value)`
/// triples, following the construction order described for the core: ID
/// allocation, duplicate-assertion rejection, and sparse matrix assembly.
pub struct DatasetBuilder<S, Var, Val> {
    allow_multiple: bool,
    #[allow(clippy::type_complexity)]
    implication_fn: Option<Box<dyn Fn(&Var, &Val, &Val) -> Option<f64>>>,
}

impl<S, Var, Val> Default for DatasetBuilder<S, Var, Val> {
    fn default() -> Self {
        Self {
            allow_multiple: false,
            implication_fn: None,
        }
    }
}

impl<S, Var, Val> DatasetBuilder<S, Var, Val>
where
    S: Eq + Hash + Clone,
    Var: Eq + Hash + Clone,
    Val: Eq + Hash + Clone,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// If true, a source's second (and later) assertion for a variable it
    /// already claimed a value for is silently dropped instead of
    /// rejected; only the first-seen claim is kept.
    pub fn allow_multiple(mut self, allow: bool) -> Self {
        self.allow_multiple = allow;
        self
    }

    /// Supply `f(var, val1, val2) -> implication in [-1, 1]` to populate
    /// `IMP`. Only invoked for pairs of distinct claims about the same
    /// variable (i.e. the off-diagonal nonzeros of `MUT_EX`).
    pub fn implication_fn(
        mut self,
        f: impl Fn(&Var, &Val, &Val) -> Option<f64> + 'static,
    ) -> Self {
        self.implication_fn = Some(Box::new(f));
        self
    }

    pub fn build(
        self,
        triples: impl IntoIterator<Item = (S, Var, Val)>,
    ) -> Result<Dataset<S, Var, Val>, CoreError> {
        let mut source_ids: IdTable<S> = IdTable::new();
        let mut var_ids: IdTable<Var> = IdTable::new();
        let mut val_ids: IdTable<Val> = IdTable::new();
        let mut claim_ids: IdTable<(u32, u32)> = IdTable::new();

        let mut source_var_pairs: HashSet<(u32, u32)> = HashSet::new();
        let mut sc_triplets: Vec<(usize, usize, f64)> = Vec::new();
        let mut mut_ex_claims: HashMap<u32, Vec<u32>> = HashMap::new();

        for (source, var, val) in triples {
            let s_id = source_ids.get_or_insert(source);
            let var_id = var_ids.get_or_insert(var);
            let val_id = val_ids.get_or_insert(val);

            if source_var_pairs.contains(&(s_id, var_id)) {
                if self.allow_multiple {
                    continue;
                }
                return Err(CoreError::DuplicateAssertion);
            }
            source_var_pairs.insert((s_id, var_id));

            let claim_id = claim_ids.get_or_insert((var_id, val_id));
            sc_triplets.push((s_id as usize, claim_id as usize, 1.0));
            mut_ex_claims.entry(var_id).or_default().push(claim_id);
        }

        let num_sources = source_ids.len();
        let num_claims = claim_ids.len();

        let sc = CsrMatrix::from_triplets(num_sources, num_claims, &sc_triplets);
        let sc_t = sc.transpose();

        let mut mut_ex_triplets: Vec<(usize, usize, f64)> = Vec::new();
        for claims in mut_ex_claims.values() {
            for &i in claims {
                for &j in claims {
                    mut_ex_triplets.push((i as usize, j as usize, 1.0));
                }
            }
        }
        let mut_ex = CsrMatrix::from_triplets(num_claims, num_claims, &mut_ex_triplets);

        let (imp, imp_t) = match &self.implication_fn {
            None => (None, None),
            Some(f) => {
                let mut imp_triplets: Vec<(usize, usize, f64)> = Vec::new();
                for (j1, j2, _) in mut_ex.nonzeros() {
                    if j1 == j2 {
                        continue;
                    }
                    let &(var_id, val1_id) = claim_ids.label_of(j1 as u32).unwrap();
                    let &(_, val2_id) = claim_ids.label_of(j2 as u32).unwrap();
                    let var = var_ids.label_of(var_id).unwrap();
                    let val1 = val_ids.label_of(val1_id).unwrap();
                    let val2 = val_ids.label_of(val2_id).unwrap();

                    if let Some(value) = f(var, val1, val2) {
                        if !(-1.0..=1.0).contains(&value) {
                            return Err(CoreError::BadParameter(format!(
                                "implication value {value} outside [-1, 1]"
                            )));
                        }
                        imp_triplets.push((j1, j2, value));
                    }
                }
                let imp = CsrMatrix::from_triplets(num_claims, num_claims, &imp_triplets);
                let imp_t = imp.transpose();
                (Some(imp), Some(imp_t))
            }
        };

        Ok(Dataset {
            source_ids,
            var_ids,
            val_ids,
            claim_ids,
            sc,
            sc_t,
            mut_ex,
            imp,
            imp_t,
        })
    }
}
