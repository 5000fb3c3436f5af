//! EBA template code lists. Source files carry the letter in front of each
//! label (`a`, `b`, ...).

use crate::schema::choice_set;

choice_set! {
    CrossCollateralisation {
        Full = 0, "a", "(a) Full";
        Partial = 1, "b", "(b) Partial";
        Absent = 2, "c", "(c) None";
    }
}

choice_set! {
    CrossDefault {
        Full = 0, "a", "(a) Full";
        Partial = 1, "b", "(b) Partial";
        Absent = 2, "c", "(c) None";
    }
}

choice_set! {
    /// Also used for the legal owner of non-property collateral.
    EntityType {
        ListedCorporate = 0, "a", "(a) Listed Corporate";
        UnlistedCorporate = 1, "b", "(b) Unlisted Corporate";
        ListedFund = 2, "c", "(c) Listed Fund";
        UnlistedFund = 3, "d", "(d) Unlisted Fund";
        Partnership = 4, "e", "(e) Partnership";
        PrivateIndividual = 5, "f", "(f) Private Individual";
    }
}

choice_set! {
    CollateralType {
        AutoMobileVehicles = 0, "a", "(a) Auto Mobile Vehicles";
        IndustrialVehicles = 1, "b", "(b) Industrial Vehicles";
        CommercialTrucks = 2, "c", "(c) Commercial Trucks";
        RailVehicles = 3, "d", "(d) Rail Vehicles";
        NauticalCommercialVehicles = 4, "e", "(e) Nautical Commercial Vehicles";
        NauticalLeisureVehicles = 5, "f", "(f) Nautical Leisure Vehicles";
        Aeroplanes = 6, "g", "(g) Aeroplanes";
        MachineTools = 7, "h", "(h) Machine Tools";
        IndustrialEquipment = 8, "i", "(i) Industrial Equipment";
        OfficeEquipment = 9, "j", "(j) Office Equipment";
        MedicalEquipment = 10, "k", "(k) Medical Equipment";
        EnergyRelatedEquipment = 11, "l", "(l) Energy Related Equipment";
        OtherVehicles = 12, "m", "(m) Other Vehicles";
        OtherEquipment = 13, "n", "(n) Other Equipment";
        OtherGoods = 14, "o", "(o) Other goods/inventory";
        Securities = 15, "p", "(p) Securities";
        Guarantee = 16, "q", "(q) Guarantee";
        LifeInsurance = 17, "r", "(r) Life insurance";
        Deposit = 18, "s", "(s) Deposit";
        FloatingCharge = 19, "t", "(t) Floating Charge";
        OtherFinancialAsset = 20, "u", "(u) Other financial asset";
    }
}

choice_set! {
    ValuationType {
        FullAppraisal = 0, "a", "(a) Full Appraisal";
        DriveBy = 1, "b", "(b) Drive-by";
        AutomatedValuationModel = 2, "c", "(c) Automated Valuation Model";
        Indexed = 3, "d", "(d) Indexed";
        Desktop = 4, "e", "(e) Desktop";
        EstateAgent = 5, "f", "(f) Managing or Estate Agent";
        PurchasePrice = 6, "g", "(g) Purchase Price";
        HairCut = 7, "h", "(h) Hair Cut";
        MarkToMarket = 8, "i", "(i) Mark to market";
        CounterpartiesValuation = 9, "j", "(j) Counterparties Valuation";
        Other = 10, "k", "(k) Other";
    }
}

choice_set! {
    NewOrUsed {
        New = 0, "a", "(a) New";
        Used = 1, "b", "(b) Used";
    }
}

choice_set! {
    SectorOfProperty {
        Commercial = 0, "a", "(a) Commercial Real Estate";
        Residential = 1, "b", "(b) Residential Real Estate";
    }
}

choice_set! {
    TypeOfProperty {
        SemiDetachedHouse = 0, "a", "(a) Semi-detached house";
        DetachedHouse = 1, "b", "(b) Detached house";
        Apartment = 2, "c", "(c) Apartment";
        Terrace = 3, "d", "(d) Terrace";
        CaravanPark = 4, "e", "(e) Caravan Park";
        CarPark = 5, "f", "(f) Car Park";
        HealthCare = 6, "g", "(g) Health Care";
        Hospitality = 7, "h", "(h) Hospitality / Hotel";
        Industrial = 8, "i", "(i) Industrial";
        LandAgriculture = 9, "j", "(j) Land - agriculture";
        LandZoning = 10, "k", "(k) Land - zoning";
        LandPermit = 11, "l", "(l) Land - permit";
        Leisure = 12, "m", "(m) Leisure";
        Multifamily = 13, "n", "(n) Multifamily";
        MixedUse = 14, "o", "(o) Mixed Use";
        Office = 15, "p", "(p) Office";
        BarPub = 16, "q", "(q) Bar / Pub";
        Restaurant = 17, "r", "(r) Restaurant";
        Retail = 18, "s", "(s) Retail";
        HighStreetRetail = 19, "t", "(t) High street retail";
        CommercialCentre = 20, "u", "(u) Commercial centre";
        SelfStorage = 21, "v", "(v) Self-Storage";
        Warehouse = 22, "w", "(w) Warehouse";
        Other = 23, "x", "(x) Other";
    }
}

choice_set! {
    TypeOfOccupancy {
        OwnerOccupied = 0, "a", "(a) Owner-occupied";
        PartiallyOwnerOccupied = 1, "b", "(b) Partially owner-occupied";
        Tenanted = 2, "c", "(c) Tenanted";
        Vacant = 3, "d", "(d) Vacant";
        Other = 4, "e", "(e) Other";
    }
}

choice_set! {
    PurposeOfProperty {
        Investment = 0, "a", "(a) Investment property";
        OwnerOccupied = 1, "b", "(b) Owner occupied";
        BuyToLet = 2, "c", "(c) Buy-to-let";
        Other = 3, "d", "(d) Other";
    }
}

choice_set! {
    ConditionOfProperty {
        Excellent = 0, "a", "(a) Excellent";
        Good = 1, "b", "(b) Good";
        Fair = 2, "c", "(c) Fair";
        Poor = 3, "d", "(d) Poor";
    }
}

choice_set! {
    AreaType {
        PrimeCityCentre = 0, "a", "(a) Prime city centre";
        CityCentre = 1, "b", "(b) City centre";
        CityNonCentre = 2, "c", "(c) City non-centre";
        Suburban = 3, "d", "(d) Suburban";
        Rural = 4, "e", "(e) Rural";
    }
}

choice_set! {
    Tenure {
        Freehold = 0, "a", "(a) Freehold";
        Leasehold = 1, "b", "(b) Leasehold";
        Other = 2, "c", "(c) Other";
    }
}

choice_set! {
    /// Valuation performed by the institution or by a third party.
    InternalOrExternal {
        Internal = 0, "a", "(a) Internal";
        External = 1, "b", "(b) External";
    }
}

choice_set! {
    /// Vintage of the NUTS3 classification used for the region of a property.
    GeographicRegionClassification {
        Nuts2013 = 0, "a", "(a) NUTS3 2013";
        Nuts2010 = 1, "b", "(b) NUTS3 2010";
        Nuts2006 = 2, "c", "(c) NUTS3 2006";
        Nuts2003 = 3, "d", "(d) NUTS3 2003";
        Other = 4, "e", "(e) Other";
    }
}

choice_set! {
    PartyLiableForVat {
        Buyer = 0, "a", "(a) Buyer";
        Seller = 1, "b", "(b) Seller";
    }
}

choice_set! {
    EnergyPerformanceCertificate {
        A = 0, "a", "(a) A";
        B = 1, "b", "(b) B";
        C = 2, "c", "(c) C";
        D = 3, "d", "(d) D";
        E = 4, "e", "(e) E";
        F = 5, "f", "(f) F";
        G = 6, "g", "(g) G";
    }
}

choice_set! {
    /// Sale stage of repossessed collateral; each stage has its own date field.
    CurrentMarketStatus {
        PreparingForSale = 0, "a", "(a) Preparing property for sale";
        OnMarket = 1, "b", "(b) Property on market";
        SaleAgreed = 2, "c", "(c) Sale agreed";
        Contracted = 3, "d", "(d) Contracted";
        Sold = 4, "e", "(e) Sold";
        FundsRemittedPartial = 5, "f", "(f) Funds remitted (partial)";
        FundsRemittedFull = 6, "g", "(g) Funds remitted (full)";
    }
}

choice_set! {
    /// Whether a forbearance or collection record is keyed by loan or by counterparty.
    TypeOfIdentifier {
        Loan = 0, "a", "(a) Loan";
        Counterparty = 1, "b", "(b) Counterparty";
    }
}

choice_set! {
    TypeOfForbearance {
        InterestRateReduction = 0, "a", "(a) Interest rate reduction";
        MaturityExtension = 1, "b", "(b) Maturity extension";
        CapitalisationOfArrears = 2, "c", "(c) Capitalisation of arrears";
        InterestOnly = 3, "d", "(d) Interest only";
        ReducedPayments = 4, "e", "(e) Reduced payments";
        PaymentHoliday = 5, "f", "(f) Payment holiday";
        PrincipalForgiveness = 6, "g", "(g) Principal forgiveness";
        Other = 7, "h", "(h) Other";
    }
}

choice_set! {
    RepaymentFrequency {
        Monthly = 0, "a", "(a) Monthly";
        Quarterly = 1, "b", "(b) Quarterly";
        SemiAnnually = 2, "c", "(c) Semi annually";
        Annually = 3, "d", "(d) Annually";
        Bullet = 4, "e", "(e) Bullet";
        Other = 5, "f", "(f) Other";
    }
}
