//! Reference vocabularies for categorical survey answers.
//!
//! These lists label the group-by buckets on the dashboard and must stay in
//! sync with the values the registration form offers. Appending a value is
//! safe; renaming one splits its bucket in historical data.

/// Pastoral sectors ("sektor pelayanan").
pub const SECTORS: &[&str] = &[
    "Sektor 1",
    "Sektor 2",
    "Sektor 3",
    "Sektor 4",
    "Sektor 5",
    "Sektor 6",
];

pub const GENDERS: &[&str] = &["Laki-laki", "Perempuan"];

pub const MARITAL_STATUSES: &[&str] = &["Belum Menikah", "Menikah", "Cerai Hidup", "Cerai Mati"];

pub const JOB_CATEGORIES: &[&str] = &[
    "PNS",
    "TNI/POLRI",
    "Karyawan Swasta",
    "Wiraswasta",
    "Petani/Nelayan",
    "Tenaga Kesehatan",
    "Guru/Dosen",
    "Buruh",
    "Pelajar/Mahasiswa",
    "Ibu Rumah Tangga",
    "Pensiunan",
    "Tidak Bekerja",
    "Lainnya",
];

/// Job categories that do not count toward the "professional" total.
/// Null and blank values are excluded as well.
pub const NON_WORKING_JOB_CATEGORIES: &[&str] = &[
    "Pelajar/Mahasiswa",
    "Ibu Rumah Tangga",
    "Pensiunan",
    "Tidak Bekerja",
    "Belum Bekerja",
];

pub const INCOME_BRACKETS: &[&str] = &[
    "< 1 juta",
    "1 - 3 juta",
    "3 - 5 juta",
    "5 - 10 juta",
    "> 10 juta",
];

pub const EDUCATION_LEVELS: &[&str] = &[
    "Tidak Sekolah",
    "SD",
    "SMP",
    "SMA/SMK",
    "D3",
    "S1",
    "S2",
    "S3",
];

pub const HEALTH_INSURANCE: &[&str] = &["BPJS", "Asuransi Swasta", "Tidak Ada"];

/// Lower-cased, trimmed spellings accepted as "yes" in flag columns. Covers
/// both the original 0/1 storage and free-text answers after widening.
pub const TRUTHY_FLAG_VALUES: &[&str] = &["1", "true", "ya", "yes", "y"];

/// Interpret a stored flag cell rendered as text.
pub fn is_truthy_flag(raw: &str) -> bool {
    let normalized = raw.trim().to_lowercase();
    TRUTHY_FLAG_VALUES.contains(&normalized.as_str())
}
