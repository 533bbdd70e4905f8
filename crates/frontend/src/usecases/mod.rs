pub mod u501_create_devis_from_demandes;
