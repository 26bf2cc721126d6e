pub mod voc_xml_loader;
