//! Closed label-to-code tables for every categorical applicant attribute.
//!
//! Each field is its own enum so that only codes the classifier was trained on
//! can ever reach a record. Variants serialize as their code (`"A14"`), while
//! the human-readable label is what the intake form presents.

use serde::{Deserialize, Serialize};

/// Shared behavior of the categorical applicant fields.
pub trait CategoryField: Copy + Sized + 'static {
    /// Column name in the classifier schema.
    const COLUMN: &'static str;

    /// Every option, in presentation order.
    fn all() -> &'static [Self];

    fn label(self) -> &'static str;

    fn code(self) -> &'static str;

    fn from_label(label: &str) -> Option<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|option| option.label() == label)
    }

    fn from_code(code: &str) -> Option<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|option| option.code() == code)
    }

    /// First option in presentation order, which the intake form preselects.
    fn default_option() -> Self {
        Self::all()[0]
    }
}

macro_rules! category_field {
    (
        $(#[$meta:meta])*
        $name:ident => $column:literal {
            $($variant:ident => ($label:literal, $code:literal)),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $code)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub const fn label(self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }

            pub const fn code(self) -> &'static str {
                match self {
                    $($name::$variant => $code,)+
                }
            }
        }

        impl CategoryField for $name {
            const COLUMN: &'static str = $column;

            fn all() -> &'static [Self] {
                Self::ALL
            }

            fn label(self) -> &'static str {
                $name::label(self)
            }

            fn code(self) -> &'static str {
                $name::code(self)
            }
        }
    };
}

category_field! {
    /// Balance band of the applicant's existing checking account.
    CheckingAccountStatus => "Status_Checking_Acc" {
        Overdrawn => ("... < 0 DM", "A11"),
        Below200 => ("0 <= ... < 200 DM", "A12"),
        AtLeast200 => ("... >= 200 DM", "A13"),
        NoAccount => ("No checking account", "A14"),
    }
}

category_field! {
    CreditHistory => "Credit_History" {
        NoCreditsOrAllPaid => ("No credits taken / all paid back", "A30"),
        AllPaidAtThisBank => ("All at this bank paid back", "A31"),
        ExistingPaidTillNow => ("Existing paid back till now", "A32"),
        DelayedPayments => ("Delay in paying off", "A33"),
        CriticalAccount => ("Critical / other credits exist", "A34"),
    }
}

category_field! {
    /// What the loan is for. `A47` does not exist in the trained schema.
    Purpose => "Purpose" {
        NewCar => ("Car (new)", "A40"),
        UsedCar => ("Car (used)", "A41"),
        FurnitureEquipment => ("Furniture / equipment", "A42"),
        RadioTelevision => ("Radio / television", "A43"),
        DomesticAppliances => ("Domestic appliances", "A44"),
        Repairs => ("Repairs", "A45"),
        Education => ("Education", "A46"),
        Retraining => ("Retraining", "A48"),
        Business => ("Business", "A49"),
        Others => ("Others", "A410"),
    }
}

category_field! {
    SavingsAccount => "Savings_Account" {
        Below100 => ("< 100 DM", "A61"),
        Below500 => ("100 <= ... < 500 DM", "A62"),
        Below1000 => ("500 <= ... < 1000 DM", "A63"),
        AtLeast1000 => (">= 1000 DM", "A64"),
        Unknown => ("Unknown", "A65"),
    }
}

category_field! {
    EmploymentSince => "Employment_Since" {
        Unemployed => ("Unemployed", "A71"),
        BelowOneYear => ("< 1 year", "A72"),
        OneToFourYears => ("1 <= ... < 4 years", "A73"),
        FourToSevenYears => ("4 <= ... < 7 years", "A74"),
        SevenYearsOrMore => (">= 7 years", "A75"),
    }
}

category_field! {
    PersonalStatusSex => "Personal_Status_Sex" {
        MaleDivorcedSeparated => ("Male : divorced/separated", "A91"),
        FemaleDivorcedSeparatedMarried => ("Female : div/sep/married", "A92"),
        MaleSingle => ("Male : single", "A93"),
        MaleMarriedWidowed => ("Male : married/widowed", "A94"),
        FemaleSingle => ("Female : single", "A95"),
    }
}

category_field! {
    OtherDebtors => "Other_Debtors" {
        None => ("None", "A101"),
        CoApplicant => ("Co-applicant", "A102"),
        Guarantor => ("Guarantor", "A103"),
    }
}

category_field! {
    Property => "Property" {
        RealEstate => ("Real estate", "A121"),
        SavingsOrLifeInsurance => ("Savings / life insurance", "A122"),
        CarOrOther => ("Car or other", "A123"),
        Unknown => ("Unknown", "A124"),
    }
}

category_field! {
    OtherInstallmentPlans => "Other_Installment_Plans" {
        Bank => ("Bank", "A141"),
        Stores => ("Stores", "A142"),
        None => ("None", "A143"),
    }
}

category_field! {
    Housing => "Housing" {
        Rent => ("Rent", "A151"),
        Own => ("Own", "A152"),
        ForFree => ("For free", "A153"),
    }
}

category_field! {
    Job => "Job" {
        UnemployedNonResident => ("Unemployed / non-resident", "A171"),
        UnskilledResident => ("Unskilled - resident", "A172"),
        SkilledEmployee => ("Skilled employee / official", "A173"),
        ManagementSelfEmployed => ("Management / self-employed", "A174"),
    }
}

category_field! {
    Telephone => "Telephone" {
        None => ("None", "A191"),
        Registered => ("Yes, registered", "A192"),
    }
}

category_field! {
    ForeignWorker => "Foreign_Worker" {
        Yes => ("Yes", "A201"),
        No => ("No", "A202"),
    }
}

/// One selectable entry as presented to the intake form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryOptionView {
    pub label: &'static str,
    pub code: &'static str,
}

/// A categorical field and its ordered options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryFieldView {
    pub column: &'static str,
    pub options: Vec<CategoryOptionView>,
}

impl CategoryFieldView {
    pub fn of<T: CategoryField>() -> Self {
        Self {
            column: T::COLUMN,
            options: T::all()
                .iter()
                .map(|option| CategoryOptionView {
                    label: option.label(),
                    code: option.code(),
                })
                .collect(),
        }
    }
}

/// All categorical fields in classifier column order.
pub fn category_catalog() -> Vec<CategoryFieldView> {
    vec![
        CategoryFieldView::of::<CheckingAccountStatus>(),
        CategoryFieldView::of::<CreditHistory>(),
        CategoryFieldView::of::<Purpose>(),
        CategoryFieldView::of::<SavingsAccount>(),
        CategoryFieldView::of::<EmploymentSince>(),
        CategoryFieldView::of::<PersonalStatusSex>(),
        CategoryFieldView::of::<OtherDebtors>(),
        CategoryFieldView::of::<Property>(),
        CategoryFieldView::of::<OtherInstallmentPlans>(),
        CategoryFieldView::of::<Housing>(),
        CategoryFieldView::of::<Job>(),
        CategoryFieldView::of::<Telephone>(),
        CategoryFieldView::of::<ForeignWorker>(),
    ]
}
