//! Static clinical background per cancer type.

use oncoscope_data::CancerType;

/// Background knowledge for one cancer type.
#[derive(Debug, Clone, Copy)]
pub struct CancerInfo {
    /// One-sentence lay description.
    pub description: &'static str,
    /// General risk factors for the type.
    pub risk_factors: &'static [&'static str],
    /// Typical presenting symptoms.
    pub symptoms: &'static [&'static str],
    /// Commonly ordered diagnostic tests.
    pub tests: &'static [&'static str],
    /// Specialists a patient would be referred to.
    pub specialists: &'static [&'static str],
}

const BREAST: CancerInfo = CancerInfo {
    description: "Breast cancer occurs when cells in breast tissue grow uncontrollably.",
    risk_factors: &[
        "age",
        "family history",
        "genetic mutations (BRCA1/BRCA2)",
        "hormone exposure",
    ],
    symptoms: &["breast lump", "breast pain", "skin changes", "nipple discharge"],
    tests: &["mammography", "breast ultrasound", "biopsy", "MRI"],
    specialists: &["breast surgeon", "oncologist"],
};

const LUNG: CancerInfo = CancerInfo {
    description: "Lung cancer is a type of cancer that begins in the lungs and can spread to other parts of the body.",
    risk_factors: &[
        "smoking",
        "age over 65",
        "family history",
        "exposure to radon or asbestos",
    ],
    symptoms: &[
        "persistent cough",
        "chest pain",
        "shortness of breath",
        "weight loss",
        "fatigue",
    ],
    tests: &["chest X-ray", "CT scan", "biopsy", "PET scan"],
    specialists: &["pulmonologist", "oncologist"],
};

const COLON: CancerInfo = CancerInfo {
    description: "Colon cancer begins in the colon or rectum and is often preventable with screening.",
    risk_factors: &[
        "age over 50",
        "family history",
        "inflammatory bowel disease",
        "diet high in red meat",
    ],
    symptoms: &[
        "changes in bowel habits",
        "blood in stool",
        "abdominal pain",
        "weight loss",
    ],
    tests: &["colonoscopy", "CT scan", "blood tests (CEA)", "biopsy"],
    specialists: &["gastroenterologist", "colorectal surgeon", "oncologist"],
};

const PROSTATE: CancerInfo = CancerInfo {
    description: "Prostate cancer develops in the prostate gland and is common in older men.",
    risk_factors: &[
        "age over 65",
        "family history",
        "race (higher in African Americans)",
        "diet",
    ],
    symptoms: &[
        "difficulty urinating",
        "blood in urine",
        "pelvic pain",
        "erectile dysfunction",
    ],
    tests: &["PSA blood test", "digital rectal exam", "biopsy", "MRI"],
    specialists: &["urologist", "oncologist"],
};

const MELANOMA: CancerInfo = CancerInfo {
    description: "Melanoma is the most serious type of skin cancer that develops in melanocytes.",
    risk_factors: &["UV exposure", "fair skin", "family history", "multiple moles"],
    symptoms: &[
        "changing moles",
        "new skin growths",
        "asymmetrical spots",
        "irregular borders",
    ],
    tests: &[
        "skin biopsy",
        "dermoscopy",
        "sentinel lymph node biopsy",
        "imaging studies",
    ],
    specialists: &["dermatologist", "oncologist"],
};

const LEUKEMIA: CancerInfo = CancerInfo {
    description: "Leukemia is a cancer of the blood and bone marrow that disrupts normal white blood cell production.",
    risk_factors: &[
        "family history",
        "prior chemotherapy or radiation",
        "certain genetic disorders",
        "benzene exposure",
    ],
    symptoms: &[
        "persistent fatigue",
        "frequent infections",
        "easy bruising or bleeding",
        "night sweats",
    ],
    tests: &[
        "complete blood count",
        "bone marrow biopsy",
        "flow cytometry",
        "genetic testing",
    ],
    specialists: &["hematologist", "oncologist"],
};

const OVARIAN: CancerInfo = CancerInfo {
    description: "Ovarian cancer begins in the ovaries and is often detected late because early symptoms are subtle.",
    risk_factors: &[
        "age over 50",
        "family history",
        "genetic mutations (BRCA1/BRCA2)",
        "endometriosis",
    ],
    symptoms: &[
        "abdominal bloating",
        "pelvic pain",
        "feeling full quickly",
        "urinary urgency",
    ],
    tests: &["pelvic ultrasound", "CA-125 blood test", "CT scan", "biopsy"],
    specialists: &["gynecologic oncologist", "oncologist"],
};

const PANCREATIC: CancerInfo = CancerInfo {
    description: "Pancreatic cancer is a serious form of cancer that develops in the pancreas.",
    risk_factors: &["smoking", "diabetes", "family history", "chronic pancreatitis"],
    symptoms: &[
        "abdominal pain",
        "weight loss",
        "jaundice",
        "new-onset diabetes",
    ],
    tests: &["CT scan", "MRI", "endoscopic ultrasound", "biopsy"],
    specialists: &["gastroenterologist", "oncologist", "pancreatic surgeon"],
};

/// Return the background entry for a cancer type.
#[must_use]
pub fn info(cancer: CancerType) -> &'static CancerInfo {
    match cancer {
        CancerType::Breast => &BREAST,
        CancerType::Lung => &LUNG,
        CancerType::Colon => &COLON,
        CancerType::Prostate => &PROSTATE,
        CancerType::Melanoma => &MELANOMA,
        CancerType::Leukemia => &LEUKEMIA,
        CancerType::Ovarian => &OVARIAN,
        CancerType::Pancreatic => &PANCREATIC,
    }
}

/// Look up the background entry by label string.
///
/// Unknown labels fall back to the Lung entry, so formatting never fails on
/// a label the table does not know.
#[must_use]
pub fn lookup(label: &str) -> &'static CancerInfo {
    CancerType::ALL
        .iter()
        .find(|c| c.as_str() == label)
        .map_or(&LUNG, |&c| info(c))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_type_has_complete_entry() {
        for &cancer in &CancerType::ALL {
            let entry = info(cancer);
            assert!(!entry.description.is_empty());
            assert!(!entry.risk_factors.is_empty());
            assert!(!entry.symptoms.is_empty());
            assert!(!entry.tests.is_empty());
            assert!(!entry.specialists.is_empty());
        }
    }

    #[test]
    fn lookup_by_canonical_label() {
        let entry = lookup("Breast");
        assert!(entry.description.contains("breast tissue"));
    }

    #[test]
    fn unknown_label_falls_back_to_lung() {
        let entry = lookup("Carcinoid");
        assert!(entry.description.starts_with("Lung cancer"));
    }
}
