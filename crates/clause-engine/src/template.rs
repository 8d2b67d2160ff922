//! Starter contract content and pre-persistence field validation

use serde::{Deserialize, Serialize};
use thiserror::Error;

use contract_types::{CanvasSection, ContractContent};

/// Placeholder for the broker's name in the starter template
pub const BROKER_PLACEHOLDER: &str = "{{corredor}}";
/// Placeholder for the monthly payment day
pub const PAYMENT_DAY_PLACEHOLDER: &str = "{{dia_pago}}";
/// Placeholder for the monthly rent in pesos
pub const RENT_PLACEHOLDER: &str = "{{renta}}";

/// The hardcoded Spanish-language template every new contract starts from
pub fn default_content() -> ContractContent {
    let mut content = ContractContent::empty();

    content.header.content = "\
CLÁUSULA PRIMERA: COMPARECIENCIA\n\
Comparecen el Arrendador y el Arrendatario individualizados en la solicitud \
de arriendo, con la intermediación del corredor {{corredor}}, quienes \
convienen en celebrar el presente contrato de arrendamiento sobre el \
inmueble que en este acto se individualiza."
        .to_string();

    content.conditions.content = "\
CLÁUSULA SEGUNDA: OBJETO\n\
El Arrendador da en arrendamiento al Arrendatario el inmueble \
individualizado, que el Arrendatario declara conocer y recibir a su entera \
conformidad.\n\n\
CLÁUSULA TERCERA: RENTA\n\
La renta mensual de arrendamiento asciende a la suma de ${{renta}}, que el \
Arrendatario pagará por anticipado dentro de los primeros {{dia_pago}} días \
de cada mes.\n\n\
CLÁUSULA CUARTA: GARANTÍA\n\
A la firma del presente contrato el Arrendatario entrega en garantía el \
equivalente a un mes de renta, suma que será restituida al término del \
contrato una vez verificado el estado del inmueble."
        .to_string();

    content.obligations.content = "\
CLÁUSULA QUINTA: OBLIGACIONES DE LAS PARTES\n\
El Arrendatario se obliga a destinar el inmueble exclusivamente a la \
habitación, a mantenerlo en buen estado de conservación y aseo, y a pagar \
oportunamente los consumos de servicios básicos y gastos comunes. El \
Arrendador se obliga a mantener el inmueble en condiciones de servir para \
el fin del arrendamiento."
        .to_string();

    content.termination.content = "\
CLÁUSULA SEXTA: TERMINACIÓN\n\
El incumplimiento de cualquiera de las obligaciones del presente contrato \
facultará a la parte diligente para solicitar la terminación anticipada del \
mismo, sin perjuicio del desahucio y la restitución del inmueble conforme a \
la ley."
        .to_string();

    content.signatures.content = "\
Firmado en dos ejemplares de un mismo tenor y fecha, quedando uno en poder \
de cada parte."
        .to_string();

    content
}

/// Validation failures surfaced with a specific user-facing message,
/// unlike transport errors which stay generic
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    #[error("Broker name is required")]
    BrokerNameRequired,

    #[error("Payment day must be between 1 and 31 (found: {0})")]
    PaymentDayOutOfRange(u8),
}

/// Fields a broker fills in before the starter template is persisted
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateFields {
    pub broker_name: String,
    pub payment_day: u8,
    #[serde(default)]
    pub monthly_rent: Option<u64>,
}

impl TemplateFields {
    /// Check the fields before any persistence happens
    pub fn validate(&self) -> Result<(), TemplateError> {
        if self.broker_name.trim().is_empty() {
            return Err(TemplateError::BrokerNameRequired);
        }
        if !(1..=31).contains(&self.payment_day) {
            return Err(TemplateError::PaymentDayOutOfRange(self.payment_day));
        }
        Ok(())
    }

    /// Substitute the template placeholders across every section
    pub fn apply(&self, mut content: ContractContent) -> ContractContent {
        let rent = self
            .monthly_rent
            .map(|r| r.to_string())
            .unwrap_or_else(|| RENT_PLACEHOLDER.to_string());

        for section in CanvasSection::ALL {
            let body = &mut content.section_mut(section).content;
            *body = body
                .replace(BROKER_PLACEHOLDER, self.broker_name.trim())
                .replace(PAYMENT_DAY_PLACEHOLDER, &self.payment_day.to_string())
                .replace(RENT_PLACEHOLDER, &rent);
        }
        content
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_template_fills_all_five_sections() {
        let content = default_content();
        assert!(!content.header.content.is_empty());
        assert!(!content.conditions.content.is_empty());
        assert!(!content.obligations.content.is_empty());
        assert!(!content.termination.content.is_empty());
        assert!(!content.signatures.content.is_empty());
    }

    #[test]
    fn test_default_template_parses_back_into_the_same_sections() {
        // The starter text must survive its own parser
        let content = default_content();
        let flat = format!(
            "{}\n{}\n{}\n{}\n{}",
            content.header.content,
            content.conditions.content,
            content.obligations.content,
            content.termination.content,
            content.signatures.content
        );
        let reparsed = crate::parser::parse_contract_text(&flat);

        assert!(reparsed.header.content.contains("COMPARECIENCIA"));
        assert!(reparsed.conditions.content.contains("RENTA"));
        assert!(reparsed.obligations.content.contains("OBLIGACIONES"));
        assert!(reparsed.termination.content.contains("TERMINACIÓN"));
        assert!(reparsed
            .signatures
            .content
            .starts_with("Firmado en dos ejemplares"));
    }

    #[test]
    fn test_blank_broker_name_is_rejected() {
        let fields = TemplateFields {
            broker_name: "   ".to_string(),
            payment_day: 5,
            monthly_rent: None,
        };
        assert_eq!(fields.validate(), Err(TemplateError::BrokerNameRequired));
    }

    #[test]
    fn test_payment_day_bounds() {
        let mut fields = TemplateFields {
            broker_name: "Propiedades Sur".to_string(),
            payment_day: 0,
            monthly_rent: None,
        };
        assert_eq!(
            fields.validate(),
            Err(TemplateError::PaymentDayOutOfRange(0))
        );

        fields.payment_day = 32;
        assert_eq!(
            fields.validate(),
            Err(TemplateError::PaymentDayOutOfRange(32))
        );

        fields.payment_day = 31;
        assert!(fields.validate().is_ok());
        fields.payment_day = 1;
        assert!(fields.validate().is_ok());
    }

    #[test]
    fn test_apply_substitutes_placeholders() {
        let fields = TemplateFields {
            broker_name: "Propiedades Sur".to_string(),
            payment_day: 5,
            monthly_rent: Some(500_000),
        };
        let content = fields.apply(default_content());

        assert!(content.header.content.contains("Propiedades Sur"));
        assert!(content.conditions.content.contains("$500000"));
        assert!(content.conditions.content.contains("primeros 5 días"));
        assert!(!content.header.content.contains(BROKER_PLACEHOLDER));
        assert!(!content.conditions.content.contains(PAYMENT_DAY_PLACEHOLDER));
    }

    #[test]
    fn test_apply_without_rent_keeps_the_placeholder() {
        let fields = TemplateFields {
            broker_name: "Propiedades Sur".to_string(),
            payment_day: 5,
            monthly_rent: None,
        };
        let content = fields.apply(default_content());
        assert!(content.conditions.content.contains(RENT_PLACEHOLDER));
    }
}
