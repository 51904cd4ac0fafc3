//! Typed cases: one body run against several implementations of a trait.
//!
//! Each case value is a constructor for one implementation, and each case is
//! named after its type.
//!
//! ```
//! use casework::{typed_cases, CaseRunner};
//! use casework::toys::answer::{Answer, ImplementationA, ImplementationB};
//!
//! let table = typed_cases!(dyn Answer => ImplementationA, ImplementationB);
//! let report = CaseRunner::new("answer")
//!     .run(&table, |make, check| {
//!         check.expect_eq(&42, &make().get_42());
//!         Ok(())
//!     })
//!     .unwrap();
//! assert!(report.all_passed());
//! assert_eq!(report.results[1].name, "ImplementationB");
//! ```

/// Constructor stored as the value of a typed case.
pub type Constructor<T> = fn() -> Box<T>;

/// Turns a type as written (`a::b::C<u8>`) into a valid case name
/// (`a_b_C_u8`). Whitespace is dropped and every run of other characters
/// outside `[A-Za-z0-9_]` becomes one `_`.
pub fn type_case_name(type_name: &str) -> String {
    let mut name = String::with_capacity(type_name.len());
    for c in type_name.chars().filter(|c| !c.is_whitespace()) {
        if c.is_ascii_alphanumeric() || c == '_' {
            name.push(c);
        } else if !name.ends_with('_') {
            name.push('_');
        }
    }
    name.trim_end_matches('_').to_string()
}

/// Builds a [`CaseTable`](crate::CaseTable) of [`Constructor`]s, one per
/// listed type, named by [`type_case_name`]. Every type must implement
/// `Default`.
#[macro_export]
macro_rules! typed_cases {
    (dyn $trait_:path => $($ty:ty),+ $(,)?) => {{
        let mut table: $crate::CaseTable<$crate::typed::Constructor<dyn $trait_>> =
            $crate::CaseTable::new();
        $(
            table.push($crate::Case::named(
                $crate::typed::type_case_name(stringify!($ty)),
                (|| Box::new(<$ty as ::std::default::Default>::default()) as Box<dyn $trait_>)
                    as $crate::typed::Constructor<dyn $trait_>,
            ));
        )+
        table
    }};
}
