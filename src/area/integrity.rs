//! Checks run on a resolved tree before anything may use it.

use super::{AreaTree, HierarchySpecs, NameLookup};
use crate::errors::CodeTableErr;

/// Verify a resolved tree against the tables it was built from.
///
/// Every parent reference must be legal for the level of its record and must point at a code in
/// the tree. Every code with a name, every matome code and every code the matome codes refer to
/// must be in the tree. The first failure is returned.
pub fn verify(
    result: &AreaTree,
    names: &NameLookup,
    specs: &HierarchySpecs,
) -> Result<(), CodeTableErr> {
    for rec in result.iter() {
        for (&level, target) in &rec.parent_refs {
            if !rec.level.may_reference(level) {
                return Err(CodeTableErr::IllegalParentRef {
                    code: rec.code.clone(),
                    level: rec.level,
                    parent: level,
                });
            }

            if !result.contains(target) {
                return Err(CodeTableErr::DanglingReference {
                    code: rec.code.clone(),
                    level,
                    target: target.clone(),
                });
            }
        }
    }

    if let Some((code, _)) = names.iter().find(|(code, _)| !result.contains(code)) {
        return Err(CodeTableErr::MissingCode(code.to_owned()));
    }

    for (matome_code, spec) in specs.iter() {
        let missing = std::iter::once(matome_code)
            .chain(spec.codes())
            .find(|code| !result.contains(code));

        if let Some(code) = missing {
            return Err(CodeTableErr::MissingCode(code.to_owned()));
        }
    }

    Ok(())
}

/*--------------------------------------------------------------------------------------------------
                                          Unit Tests
--------------------------------------------------------------------------------------------------*/
