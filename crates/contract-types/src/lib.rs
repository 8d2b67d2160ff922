pub mod audit;
pub mod types;

pub use types::{
    CanvasSection, ContractClause, ContractContent, ContractStatus, RentalContract, SectionBody,
};
