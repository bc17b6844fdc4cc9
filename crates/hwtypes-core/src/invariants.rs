//! Invariant checks excluded from coverage reports.

#![cfg_attr(coverage_nightly, coverage(off))]

use crate::types::{Alternative, Param, Type};

impl Type {
    /// Field types of a bound tuple or product.
    ///
    /// Registry validation guarantees the parameter shape matches the kind.
    pub(crate) fn ensure_field_types(&self) -> Vec<Type> {
        match self.param() {
            Some(Param::Types(types)) => types.clone(),
            Some(Param::Record { fields, .. }) => fields.iter().map(|(_, ty)| ty.clone()).collect(),
            other => panic!("{self}: bound aggregate without field schema (param: {other:?})"),
        }
    }

    pub(crate) fn ensure_record(&self) -> &[(String, Type)] {
        match self.param() {
            Some(Param::Record { fields, .. }) => fields,
            other => panic!("{self}: bound product without record schema (param: {other:?})"),
        }
    }

    pub(crate) fn ensure_alternatives(&self) -> &[Alternative] {
        match self.param() {
            Some(Param::Alternatives(alts)) => alts,
            other => panic!("{self}: bound sum without alternatives (param: {other:?})"),
        }
    }

    pub(crate) fn ensure_constants(&self) -> &[(String, i64)] {
        match self.param() {
            Some(Param::Constants(constants)) => constants,
            other => panic!("{self}: bound enum without constants (param: {other:?})"),
        }
    }
}
