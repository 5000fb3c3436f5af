//! Code dictionaries of the single-family loan performance layout.

use crate::schema::choice_set;

choice_set! {
    AmortizationType {
        Adjustable = 0, "ARM", "Adjustable Rate Mortgage";
        Fixed = 1, "FRM", "Fixed Rate Mortgage";
    }
}

choice_set! {
    Channel {
        Retail = 0, "R", "Retail";
        Correspondent = 1, "C", "Correspondent";
        Broker = 2, "B", "Broker";
    }
}

choice_set! {
    LoanPurpose {
        CashOutRefinance = 0, "C", "Cash-Out Refinance";
        Refinance = 1, "R", "Refinance";
        Purchase = 2, "P", "Purchase";
        RefinanceNotSpecified = 3, "U", "Refinance-Not Specified";
    }
}

choice_set! {
    FirstTimeHomeBuyer {
        Yes = 0, "Y", "Yes";
        No = 1, "N", "No";
        NotClassified = 2, "Null", "Not Classified";
    }
}

choice_set! {
    PropertyType {
        Condominium = 0, "CO", "Condominium";
        Cooperative = 1, "CP", "Co-operative";
        PlannedUrbanDevelopment = 2, "PU", "Planned Urban Development";
        ManufacturedHousing = 3, "MH", "Manufactured Housing";
        SingleFamily = 4, "SF", "Single-Family Home";
    }
}

choice_set! {
    OccupancyStatus {
        Principal = 0, "P", "Principal";
        Second = 1, "S", "Second";
        Investor = 2, "I", "Investor";
        Unknown = 3, "U", "Unknown";
    }
}

choice_set! {
    ZeroBalanceCode {
        PrepaidOrMatured = 0, "01", "Prepaid or Matured";
        ThirdPartySale = 1, "02", "Third Party Sale";
        ShortSale = 2, "03", "Short Sale";
        Repurchased = 3, "06", "Repurchased";
        DeedInLieu = 4, "09", "Deed-in-Lieu; REO Disposition";
        NotesSales = 5, "15", "Notes Sales";
        ReperformingLoanSale = 6, "16", "Reperforming Loan Sale";
        NonCreditRemoval = 7, "96", "Removal (non-credit event)";
        Delinquency = 8, "97", "Delinquency (credit event due to D180)";
        OtherCreditEvent = 9, "98", "Other Credit Event";
    }
}

choice_set! {
    MortgageInsuranceType {
        BorrowerPaid = 0, "1", "Borrower Paid";
        LenderPaid = 1, "2", "Lender Paid";
        EnterprisePaid = 2, "3", "Enterprise Paid";
        NoMortgageInsurance = 3, "Null", "No Mortgage Insurance";
    }
}

choice_set! {
    SpecialEligibilityProgram {
        HfaPreferred = 0, "F", "HFA Preferred";
        HomeReady = 1, "H", "HomeReady";
        RefiNow = 2, "R", "RefiNow";
        Other = 3, "O", "Other";
        NotApplicable = 4, "7", "Not Applicable";
        NotAvailable = 5, "N", "Not Available";
    }
}

choice_set! {
    LoanHoldbackIndicator {
        Yes = 0, "Y", "Yes";
        No = 1, "N", "No";
        NotClassified = 2, "Null", "Not Classified";
    }
}

choice_set! {
    PropertyValuationMethod {
        Appraisal = 0, "A", "Appraisal";
        OnsiteDataCollection = 1, "P", "Onsite Property Data Collection";
        TargetedRefinance = 2, "R", "GSE Targeted Refinance";
        AppraisalWaiver = 3, "W", "Appraisal Waiver";
        Other = 4, "O", "Other";
    }
}

choice_set! {
    BorrowerAssistancePlan {
        Forbearance = 0, "F", "Forbearance Plan";
        Repayment = 1, "R", "Repayment Plan";
        TrialPeriod = 2, "T", "Trial Period Plan";
        OtherWorkout = 3, "O", "Other Workout Plan";
        NoWorkout = 4, "N", "No Workout Plan";
        NotApplicable = 5, "7", "Not Applicable";
        NotAvailable = 6, "9", "Not Available";
    }
}

choice_set! {
    AlternativeDelinquencyResolution {
        PaymentDeferral = 0, "P", "Payment Deferral";
        CovidDeferral = 1, "C", "COVID-19 Payment Deferral";
        DisasterDeferral = 2, "D", "Disaster Payment Deferral";
        NotApplicable = 3, "7", "Not Applicable";
        NotAvailable = 4, "9", "Not Available";
    }
}
