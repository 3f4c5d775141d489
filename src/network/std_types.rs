//! Fixed standard-type catalog: the created elements take their electrical
//! parameters from here, not from asset attributes.

/// Per-kilometre line parameters.
#[derive(Clone, Copy, Debug)]
pub struct LineType {
    pub r_ohm_per_km: f64,
    pub x_ohm_per_km: f64,
    pub c_nf_per_km: f64,
    pub max_i_ka: f64,
}

/// Two-winding transformer parameters.
#[derive(Clone, Copy, Debug)]
pub struct TransformerType {
    pub sn_mva: f64,
    pub vn_hv_kv: f64,
    pub vn_lv_kv: f64,
    pub vk_percent: f64,
    pub vkr_percent: f64,
    pub pfe_kw: f64,
    pub i0_percent: f64,
    pub shift_degree: f64,
}

pub(super) fn line_type(name: &str) -> Option<LineType> {
    let line_type = match name {
        "NAYY 4x50 SE" => LineType {
            r_ohm_per_km: 0.642,
            x_ohm_per_km: 0.083,
            c_nf_per_km: 210.0,
            max_i_ka: 0.142,
        },
        "NAYY 4x120 SE" => LineType {
            r_ohm_per_km: 0.225,
            x_ohm_per_km: 0.080,
            c_nf_per_km: 264.0,
            max_i_ka: 0.242,
        },
        "NA2XS2Y 1x95 RM/25 12/20 kV" => LineType {
            r_ohm_per_km: 0.313,
            x_ohm_per_km: 0.132,
            c_nf_per_km: 216.0,
            max_i_ka: 0.252,
        },
        _ => return None,
    };
    Some(line_type)
}

pub(super) fn transformer_type(name: &str) -> Option<TransformerType> {
    let transformer_type = match name {
        "0.4 MVA 20/0.4 kV" => TransformerType {
            sn_mva: 0.4,
            vn_hv_kv: 20.0,
            vn_lv_kv: 0.4,
            vk_percent: 6.0,
            vkr_percent: 1.425,
            pfe_kw: 1.35,
            i0_percent: 0.3375,
            shift_degree: 150.0,
        },
        "0.63 MVA 20/0.4 kV" => TransformerType {
            sn_mva: 0.63,
            vn_hv_kv: 20.0,
            vn_lv_kv: 0.4,
            vk_percent: 6.0,
            vkr_percent: 1.206,
            pfe_kw: 1.65,
            i0_percent: 0.2619,
            shift_degree: 150.0,
        },
        _ => return None,
    };
    Some(transformer_type)
}
