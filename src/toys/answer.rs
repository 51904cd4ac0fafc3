/// A capability with more than one implementation, for typed cases.
pub trait Answer {
    fn get_42(&self) -> i32;
}

#[derive(Debug, Default)]
pub struct ImplementationA;

impl Answer for ImplementationA {
    fn get_42(&self) -> i32 {
        42
    }
}

#[derive(Debug, Default)]
pub struct ImplementationB;

impl Answer for ImplementationB {
    fn get_42(&self) -> i32 {
        6 * 7
    }
}
