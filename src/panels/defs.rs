use std::fmt;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PanelKind {
    Platelets,
    Erythrocytes,
    Coagulation,
}

impl PanelKind {
    pub fn all() -> &'static [PanelKind] {
        &[
            PanelKind::Platelets,
            PanelKind::Erythrocytes,
            PanelKind::Coagulation,
        ]
    }

    pub fn id(self) -> &'static str {
        match self {
            PanelKind::Platelets => "plat",
            PanelKind::Erythrocytes => "erythro",
            PanelKind::Coagulation => "coag",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PanelKind::Platelets => "Platelets",
            PanelKind::Erythrocytes => "Erythrocytes",
            PanelKind::Coagulation => "Coagulation",
        }
    }

    pub fn ratio_caption(self) -> &'static str {
        match self {
            PanelKind::Platelets => "Platelets : Plasma",
            PanelKind::Erythrocytes => "Erythrocytes : Plasma",
            PanelKind::Coagulation => "Plasma : Coagulation",
        }
    }

    /// Coagulation depletes fibrinogen, so its ratio is read inverted.
    pub fn reverse(self) -> bool {
        matches!(self, PanelKind::Coagulation)
    }

    pub fn parse(name: &str) -> Option<PanelKind> {
        let lower = name.trim().to_ascii_lowercase();
        PanelKind::all()
            .iter()
            .copied()
            .find(|k| k.id() == lower || k.label().to_ascii_lowercase() == lower)
    }
}

impl fmt::Display for PanelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct PanelDef {
    pub kind: PanelKind,
    /// Reference entries; each may be a semicolon-delimited alias list.
    pub entries: &'static [&'static str],
    /// Entries used for the ratio when only part of the panel is informative.
    pub ratio_subset: Option<&'static [&'static str]>,
    pub key_markers: &'static [&'static str],
}

const PLATELET_MARKERS: &[&str] = &[
    "FLNA", "TLN1", "MYH9", "ACTB", "ACTG1", "TPM4", "ITGA2B", "ITGB3", "GP1BA", "GP9", "GP5",
    "PF4", "PPBP", "VCL", "ZYX", "PFN1", "CFL1", "TAGLN2", "ACTN1", "MMRN1", "F13A1", "LIMS1",
    "ILK", "THBS1", "SPARC", "YWHAZ", "TUBB1", "CALM1;CALM2;CALM3", "RAP1B", "PKM",
];

const ERYTHROCYTE_MARKERS: &[&str] = &[
    "HBA1;HBA2", "HBA1", "HBB", "HBD", "HBG1;HBG2", "CA1", "CA2", "CAT", "PRDX2", "BLVRB",
    "SLC4A1", "SPTA1", "SPTB", "ANK1", "EPB42", "BPGM", "ALAD", "HBQ1", "SELENBP1", "FECH",
];

const COAGULATION_MARKERS: &[&str] = &[
    "FGA", "FGB", "FGG", "PF4", "PPBP", "F13A1", "F13B", "F2", "F5", "F10", "SERPINC1", "PLG",
];

const FIBRINOGEN_CHAINS: &[&str] = &["FGA", "FGB", "FGG"];

const BUILTIN_PANELS: &[PanelDef] = &[
    PanelDef {
        kind: PanelKind::Platelets,
        entries: PLATELET_MARKERS,
        ratio_subset: None,
        key_markers: &["FLNA", "TLN1", "MYH9"],
    },
    PanelDef {
        kind: PanelKind::Erythrocytes,
        entries: ERYTHROCYTE_MARKERS,
        ratio_subset: None,
        key_markers: &["HBA1", "HBB", "CA1"],
    },
    PanelDef {
        kind: PanelKind::Coagulation,
        entries: COAGULATION_MARKERS,
        ratio_subset: Some(FIBRINOGEN_CHAINS),
        key_markers: &["FGB", "FGG", "FGA"],
    },
];

pub fn builtin_defs() -> &'static [PanelDef] {
    BUILTIN_PANELS
}

pub fn builtin_def(kind: PanelKind) -> &'static PanelDef {
    let idx = PanelKind::all().iter().position(|k| *k == kind).unwrap_or(0);
    &BUILTIN_PANELS[idx]
}
